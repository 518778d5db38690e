pub mod forms;

pub use forms::FormService;
