pub mod assignment;
pub mod book;
pub mod class;
pub mod progress;
pub mod school;
pub mod student;
pub mod user;
