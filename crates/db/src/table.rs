use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Document {
    Table,
    Key,
    Value,
    UpdatedAt,
}
