// Модули реестра
pub mod config;
pub mod error;
pub mod model;    // src/model/{mod,student,course}.rs
pub mod registry;
pub mod store;    // src/store/{mod,decode}.rs

// Интерактивное меню (Session + dispatch)
pub mod menu;     // src/menu/{mod,prompt}.rs

// Удобные реэкспорты
pub use config::RegistryConfig;
pub use error::{RecordKind, RegistryError, RegistryResult};
pub use menu::{MenuOption, Session};
pub use model::course::CourseDetails;
pub use model::student::StudentDetails;
pub use model::{Course, Person, Student};
pub use registry::{Registry, Summary};
