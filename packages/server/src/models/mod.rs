pub mod contest;
pub mod directory;
pub mod judge;
pub mod registration;
pub mod resource;
pub mod result;
pub mod shared;
pub mod team;
