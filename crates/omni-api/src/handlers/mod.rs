pub mod assist;
pub mod health;
pub mod menus;
pub mod roles;
pub mod session;
pub mod users;
