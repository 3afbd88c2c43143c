//! Mock defaults loaded at process start.

use chrono::NaiveDate;

use crate::domain::{MenuItem, RoleDefinition, User, UserRole, UserStatus};
use crate::error::DomainError;
use crate::navigation::{MenuTree, RolePermissionMatrix, RolePermissionSet};

pub fn menu() -> Result<MenuTree, DomainError> {
    MenuTree::new(vec![
        MenuItem::new("m1", "System Dashboard", "/dashboard").with_icon("LayoutDashboard"),
        MenuItem::new("m2", "Resource Administration", "/resources")
            .with_icon("Database")
            .with_child(MenuItem::new("m2-1", "Central File Store", "/resources/files").with_icon("FolderClosed"))
            .with_child(MenuItem::new("m2-2", "Folder Permissions", "/resources/mapping").with_icon("ShieldAlert")),
        MenuItem::new("m3", "Monitoring & Audit", "/system")
            .with_icon("Terminal")
            .with_child(MenuItem::new("m3-1", "Access Logs", "/system/logs").with_icon("Terminal"))
            .with_child(MenuItem::new("m3-2", "Security Policy", "/system/policy").with_icon("ShieldAlert")),
        MenuItem::new("m4", "People Management", "/users").with_icon("LayoutDashboard"),
    ])
}

pub fn roles() -> Result<Vec<RoleDefinition>, DomainError> {
    Ok(vec![
        RoleDefinition::new(
            "r1",
            "System Administrator",
            "SUPER_ADMIN",
            "Full control over configuration, infrastructure and monitoring.",
            true,
        )?,
        RoleDefinition::new(
            "r2",
            "Office User",
            "OFFICE_USER",
            "Access to files and the basic business modules.",
            true,
        )?,
        RoleDefinition::new(
            "r3",
            "Security Auditor",
            "AUDITOR",
            "Read-only access to logs and system health reports.",
            false,
        )?,
    ])
}

pub fn role_permissions() -> RolePermissionMatrix {
    let mut matrix = RolePermissionMatrix::new();
    matrix.replace(
        "r1",
        RolePermissionSet::from_ids(["m1", "m2", "m2-1", "m2-2", "m3", "m3-1", "m3-2"]),
    );
    matrix.replace("r2", RolePermissionSet::from_ids(["m1", "m2", "m2-1"]));
    matrix
}

pub fn users() -> Result<Vec<User>, DomainError> {
    Ok(vec![
        User::new("1", "vana", "Nguyen Van A", "vana@omnicore.pro", UserRole::Administrator, "Engineering", date(2023, 1, 15)?)?
            .with_phone("0901234567")
            .with_last_login(date(2024, 5, 22)?),
        User::new("2", "thib", "Tran Thi B", "thib@omnicore.pro", UserRole::StandardUser, "Sales", date(2023, 3, 10)?)?
            .with_phone("0912345678")
            .with_last_login(date(2024, 5, 21)?),
        User::new("3", "vanc", "Le Van C", "vanc@omnicore.pro", UserRole::StandardUser, "Engineering", date(2023, 6, 20)?)?
            .with_phone("0933333333")
            .with_last_login(date(2024, 5, 20)?),
        User::new("7", "vang", "Do Van G", "vang@omnicore.pro", UserRole::Administrator, "Board of Directors", date(2022, 12, 1)?)?
            .with_phone("0977777777")
            .with_status(UserStatus::Active)
            .with_last_login(date(2024, 5, 22)?),
    ])
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::ValidationError(format!("invalid date {}-{}-{}", year, month, day)))
}
