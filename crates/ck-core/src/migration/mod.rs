//! Legacy record detection and upgrade.

pub mod migrator;
pub mod steps;

pub use migrator::{
    get_migration_summary, migrate_contract, migrate_contracts, migrate_value, needs_migration,
    Migrator,
};
pub use steps::{
    normalize_category, normalize_contact_info, CategoryStep, ContactInfoStep, MigrationContext,
    MigrationStep, PaymentInfoStep, StatusStep, StepOutcome,
};
