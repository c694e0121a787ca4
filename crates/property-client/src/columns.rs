//! Table column layout and its persistence.
//!
//! The layout is an ordered list of the seven listing columns. A stored
//! layout that does not hold exactly those columns is discarded in favour of
//! the default, so a layout written by an older client heals itself on load.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LayoutError;
use crate::local_store::LocalStore;

/// Storage key of the serialised layout.
pub const COLUMNS_STORAGE_KEY: &str = "property-columns-config";

/// Column that is always shown.
pub const ACTIONS_KEY: &str = "actions";

const DEFAULT_COLUMNS: [(&str, &str); 7] = [
    ("title", "Title"),
    ("price", "Price"),
    ("location", "Location"),
    ("bedrooms", "Bedrooms"),
    ("bathrooms", "Bathrooms"),
    ("status", "Status"),
    (ACTIONS_KEY, "Actions"),
];

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Stable column key.
    pub key: String,
    /// Header label.
    pub label: String,
    /// Whether the column is shown.
    pub visible: bool,
    /// One-based display position.
    pub order: u32,
}

/// Ordered set of every listing column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnLayout {
    columns: Vec<ColumnConfig>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        let columns = DEFAULT_COLUMNS
            .iter()
            .zip(1..)
            .map(|(&(key, label), order)| ColumnConfig {
                key: key.to_owned(),
                label: label.to_owned(),
                visible: true,
                order,
            })
            .collect();
        Self { columns }
    }
}

impl ColumnLayout {
    /// Accept `columns` only when they hold exactly the known keys, each
    /// once; otherwise return the default layout. Accepted columns are
    /// sorted by `order`, renumbered from 1, and the actions column is
    /// forced visible.
    #[must_use]
    pub fn heal(mut columns: Vec<ColumnConfig>) -> Self {
        let exact = columns.len() == DEFAULT_COLUMNS.len()
            && DEFAULT_COLUMNS.iter().all(|(key, _)| {
                columns.iter().filter(|column| column.key == *key).count() == 1
            });
        if !exact {
            warn!("stored column layout does not match the known columns; using defaults");
            return Self::default();
        }
        columns.sort_by_key(|column| column.order);
        for (column, order) in columns.iter_mut().zip(1..) {
            column.order = order;
            if column.key == ACTIONS_KEY {
                column.visible = true;
            }
        }
        Self { columns }
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    /// Shown columns in display order.
    pub fn visible(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|column| column.visible)
    }

    /// Show or hide the column `key`.
    ///
    /// # Errors
    /// Returns [`LayoutError::UnknownColumn`] for an unknown key and
    /// [`LayoutError::Locked`] when hiding the actions column.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<(), LayoutError> {
        if key == ACTIONS_KEY && !visible {
            return Err(LayoutError::Locked {
                key: key.to_owned(),
            });
        }
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.key == key)
            .ok_or_else(|| LayoutError::UnknownColumn {
                key: key.to_owned(),
            })?;
        column.visible = visible;
        Ok(())
    }

    /// Move the column `key` to one-based `position` (clamped to the
    /// layout) and renumber every column from 1.
    ///
    /// # Errors
    /// Returns [`LayoutError::UnknownColumn`] for an unknown key.
    pub fn move_column(&mut self, key: &str, position: usize) -> Result<(), LayoutError> {
        let from = self
            .columns
            .iter()
            .position(|column| column.key == key)
            .ok_or_else(|| LayoutError::UnknownColumn {
                key: key.to_owned(),
            })?;
        let column = self.columns.remove(from);
        let to = position.saturating_sub(1).min(self.columns.len());
        self.columns.insert(to, column);
        for (column, order) in self.columns.iter_mut().zip(1..) {
            column.order = order;
        }
        Ok(())
    }
}

/// Column layout kept in sync with a [`LocalStore`].
///
/// Storage failures never block the caller: unreadable content falls back
/// to the default layout and failed writes are logged.
#[derive(Debug)]
pub struct ColumnLayoutStore {
    store: LocalStore,
    layout: ColumnLayout,
}

impl ColumnLayoutStore {
    /// Load the stored layout, healing it when incomplete or unreadable.
    #[must_use]
    pub fn load(store: LocalStore) -> Self {
        let layout = match store.get(COLUMNS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ColumnConfig>>(&raw) {
                Ok(columns) => ColumnLayout::heal(columns),
                Err(error) => {
                    warn!(%error, "stored column layout is not valid JSON; using defaults");
                    ColumnLayout::default()
                }
            },
            Ok(None) => ColumnLayout::default(),
            Err(error) => {
                warn!(%error, "failed to read column layout; using defaults");
                ColumnLayout::default()
            }
        };
        Self { store, layout }
    }

    /// Current layout.
    #[must_use]
    pub const fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Show or hide a column and persist the result.
    ///
    /// # Errors
    /// Propagates [`ColumnLayout::set_visible`] failures; storage failures
    /// are only logged.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<(), LayoutError> {
        self.layout.set_visible(key, visible)?;
        self.persist();
        Ok(())
    }

    /// Move a column and persist the result.
    ///
    /// # Errors
    /// Propagates [`ColumnLayout::move_column`] failures; storage failures
    /// are only logged.
    pub fn move_column(&mut self, key: &str, position: usize) -> Result<(), LayoutError> {
        self.layout.move_column(key, position)?;
        self.persist();
        Ok(())
    }

    /// Restore and persist the default layout.
    pub fn reset(&mut self) {
        self.layout = ColumnLayout::default();
        self.persist();
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.layout)
            .map_err(|err| LayoutError::Encoding {
                message: err.to_string(),
            })
            .and_then(|raw| self.store.set(COLUMNS_STORAGE_KEY, raw));
        if let Err(error) = result {
            warn!(%error, "failed to save column layout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn keys(layout: &ColumnLayout) -> Vec<&str> {
        layout
            .columns()
            .iter()
            .map(|column| column.key.as_str())
            .collect()
    }

    fn orders(layout: &ColumnLayout) -> Vec<u32> {
        layout.columns().iter().map(|column| column.order).collect()
    }

    #[fixture]
    fn local_store() -> (TempDir, LocalStore) {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
        let store = LocalStore::open(&root).expect("open store");
        (temp, store)
    }

    #[rstest]
    fn default_layout_lists_every_column_visible() {
        let layout = ColumnLayout::default();
        assert_eq!(
            keys(&layout),
            [
                "title",
                "price",
                "location",
                "bedrooms",
                "bathrooms",
                "status",
                "actions"
            ]
        );
        assert_eq!(orders(&layout), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.visible().count(), 7);
    }

    #[rstest]
    fn layout_missing_a_column_heals_to_default() {
        let mut columns = ColumnLayout::default().columns().to_vec();
        columns.retain(|column| column.key != "status");
        if let Some(first) = columns.first_mut() {
            first.visible = false;
        }

        assert_eq!(ColumnLayout::heal(columns), ColumnLayout::default());
    }

    #[rstest]
    fn complete_layout_is_kept_in_stored_order() {
        let mut columns = ColumnLayout::default().columns().to_vec();
        columns.reverse();
        let healed = ColumnLayout::heal(columns);
        assert_eq!(orders(&healed), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[rstest]
    fn hidden_actions_column_is_shown_again() {
        let mut columns = ColumnLayout::default().columns().to_vec();
        for column in &mut columns {
            column.visible = column.key == "title";
        }

        let healed = ColumnLayout::heal(columns);

        let shown: Vec<&str> = healed.visible().map(|column| column.key.as_str()).collect();
        assert_eq!(shown, ["title", ACTIONS_KEY]);
    }

    #[rstest]
    #[case::duplicate_key("price")]
    #[case::unknown_key("garage")]
    fn layout_with_foreign_columns_heals_to_default(#[case] extra: &str) {
        let mut columns = ColumnLayout::default().columns().to_vec();
        columns.push(ColumnConfig {
            key: extra.to_owned(),
            label: "Extra".to_owned(),
            visible: false,
            order: 8,
        });

        assert_eq!(ColumnLayout::heal(columns), ColumnLayout::default());
    }

    #[rstest]
    fn duplicate_replacing_a_column_heals_to_default() {
        let mut columns = ColumnLayout::default().columns().to_vec();
        if let Some(last) = columns.last_mut() {
            last.key = "title".to_owned();
        }

        assert_eq!(ColumnLayout::heal(columns), ColumnLayout::default());
    }

    #[rstest]
    fn clashing_orders_are_renumbered() {
        let mut columns = ColumnLayout::default().columns().to_vec();
        for column in &mut columns {
            column.order = 3;
        }

        assert_eq!(orders(&ColumnLayout::heal(columns)), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[rstest]
    fn load_repairs_a_stored_layout_hiding_actions(local_store: (TempDir, LocalStore)) {
        let (_temp, store) = local_store;
        let mut columns = ColumnLayout::default().columns().to_vec();
        for column in &mut columns {
            column.visible = column.key != ACTIONS_KEY;
        }
        let raw = serde_json::to_string(&columns).expect("encode layout");
        store.set(COLUMNS_STORAGE_KEY, raw).expect("write layout");

        let loaded = ColumnLayoutStore::load(store);

        assert_eq!(loaded.layout(), &ColumnLayout::default());
    }

    #[rstest]
    fn load_discards_a_stored_layout_with_unknown_columns(local_store: (TempDir, LocalStore)) {
        let (_temp, store) = local_store;
        let mut columns = ColumnLayout::default().columns().to_vec();
        if let Some(first) = columns.first_mut() {
            first.visible = false;
        }
        columns.push(ColumnConfig {
            key: "garage".to_owned(),
            label: "Garage".to_owned(),
            visible: true,
            order: 8,
        });
        let raw = serde_json::to_string(&columns).expect("encode layout");
        store.set(COLUMNS_STORAGE_KEY, raw).expect("write layout");

        let loaded = ColumnLayoutStore::load(store);

        assert_eq!(loaded.layout(), &ColumnLayout::default());
    }

    #[rstest]
    fn move_renumbers_orders() {
        let mut layout = ColumnLayout::default();
        layout.move_column("status", 1).expect("known column");

        assert_eq!(
            keys(&layout),
            [
                "status",
                "title",
                "price",
                "location",
                "bedrooms",
                "bathrooms",
                "actions"
            ]
        );
        assert_eq!(orders(&layout), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[rstest]
    fn move_past_the_end_clamps() {
        let mut layout = ColumnLayout::default();
        layout.move_column("title", 99).expect("known column");
        assert_eq!(keys(&layout).last(), Some(&"title"));
    }

    #[rstest]
    fn actions_column_cannot_be_hidden() {
        let mut layout = ColumnLayout::default();
        assert_eq!(
            layout.set_visible(ACTIONS_KEY, false),
            Err(LayoutError::Locked {
                key: ACTIONS_KEY.to_owned()
            })
        );
        assert_eq!(
            layout.set_visible("garage", false),
            Err(LayoutError::UnknownColumn {
                key: "garage".to_owned()
            })
        );
    }

    #[rstest]
    fn edits_persist_across_loads(local_store: (TempDir, LocalStore)) {
        let (temp, store) = local_store;
        let mut columns = ColumnLayoutStore::load(store);
        columns.set_visible("bathrooms", false).expect("known column");
        columns.move_column("price", 1).expect("known column");

        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
        let reloaded = ColumnLayoutStore::load(LocalStore::open(&root).expect("reopen store"));

        assert_eq!(reloaded.layout(), columns.layout());
        assert_eq!(keys(reloaded.layout()).first(), Some(&"price"));
        assert!(
            !reloaded
                .layout()
                .columns()
                .iter()
                .any(|column| column.key == "bathrooms" && column.visible)
        );
    }

    #[rstest]
    fn corrupt_stored_layout_falls_back_to_default(local_store: (TempDir, LocalStore)) {
        let (_temp, store) = local_store;
        store
            .set(COLUMNS_STORAGE_KEY, "{oops".to_owned())
            .expect("write garbage");

        let columns = ColumnLayoutStore::load(store);

        assert_eq!(columns.layout(), &ColumnLayout::default());
    }
}
