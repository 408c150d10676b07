
mod directory;
mod judging;
mod registration;
mod resource;
mod results;
