pub mod batch;
pub mod company;
pub mod internship;
pub mod people;

pub use batch::Batch;
pub use company::Company;
pub use internship::{AssignmentCommand, CreatePositionRequest, InternshipPosition, PositionTemplate};
pub use people::{Mentor, Student, Teacher};
