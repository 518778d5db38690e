pub mod forms;

pub use forms::configure_forms_routes;
