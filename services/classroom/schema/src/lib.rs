//! sea-orm entities of the classroom service.

pub mod book_assignments;
pub mod book_pages;
pub mod books;
pub mod classes;
pub mod reading_progress;
pub mod schools;
pub mod student_profiles;
pub mod users;
