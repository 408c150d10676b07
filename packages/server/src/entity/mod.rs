pub mod contest;
pub mod contest_resource;
pub mod contest_result;
pub mod expert;
pub mod judge_assignment;
pub mod registration;
pub mod student;
pub mod team;
pub mod team_member;
