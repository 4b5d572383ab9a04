mod document_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "menuplan",
    "m0_1",
    vec_box![],
    vec_box![document_create_table::Operation]
);
