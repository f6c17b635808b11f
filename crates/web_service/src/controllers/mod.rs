pub mod deploy_controller;
pub mod explorer_controller;
pub mod system_controller;
