/// One row of the menu table. Sourced from the datastore on every lookup;
/// never cached here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}
