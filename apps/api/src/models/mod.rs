pub mod cover_letter;
pub mod resume;

pub use cover_letter::CoverLetterRequest;
pub use resume::{Certificate, Education, Experience, PersonalInfo, Project, ResumeData};
