//! Live menu lookup against the datastore.
//!
//! The service reports failure as a typed error; the caller nearest the
//! request handler collapses it into the apology reply so a broken datastore
//! never surfaces as an HTTP error.

use sqlx::PgPool;

use crate::server::models::menu::MenuItem;

pub const MENU_UNAVAILABLE_REPLY: &str =
    "Sorry, the menu isn’t available right now. Please try again later.";
pub const MENU_EMPTY_REPLY: &str =
    "We’re updating our menu at the moment — please check back soon!";

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("menu query failed: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct MenuService {
    pool: PgPool,
}

impl MenuService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the current menu rows and render them as a multi-line text blob.
    /// Rows are fetched fresh on every call; nothing is cached.
    pub async fn fetch_menu(&self) -> Result<String, MenuError> {
        let items = sqlx::query_as::<_, MenuItem>(
            "SELECT name, price FROM menu_items ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(render_menu(&items))
    }
}

fn render_menu(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return MENU_EMPTY_REPLY.to_string();
    }

    let mut lines = vec!["Here’s our current menu:".to_string()];
    lines.extend(
        items
            .iter()
            .map(|item| format!("- {}: ${:.2}", item.name, item.price)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_items_as_a_plain_text_list() {
        let items = vec![
            MenuItem {
                name: "Americano".to_string(),
                price: 3.0,
            },
            MenuItem {
                name: "Blueberry Muffin".to_string(),
                price: 2.2,
            },
        ];

        assert_eq!(
            render_menu(&items),
            "Here’s our current menu:\n- Americano: $3.00\n- Blueberry Muffin: $2.20"
        );
    }

    #[test]
    fn renders_an_empty_table_as_the_fixed_line() {
        assert_eq!(render_menu(&[]), MENU_EMPTY_REPLY);
    }
}
