// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use lacuenta_app::{APP_NAME, expense_columns};
use lacuenta_grid::ColumnSpec;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_ROW_KEY: &str = "id";
const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub query: Query,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            table: Table::default(),
            query: Query::default(),
            columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub row_key: Option<String>,
    pub resizable: Option<bool>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            row_key: Some(DEFAULT_ROW_KEY.to_owned()),
            resizable: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    pub page_size: Option<u64>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("LACUENTA_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set LACUENTA_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [table], [query], and [[columns]]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(row_key) = &self.table.row_key
            && row_key.trim().is_empty()
        {
            bail!("table.row_key in {} must not be empty", path.display());
        }

        if let Some(page_size) = self.query.page_size
            && page_size == 0
        {
            bail!("query.page_size in {} must be positive", path.display());
        }

        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                bail!("a column in {} has an empty key", path.display());
            }
            if !seen.insert(column.key.as_str()) {
                bail!(
                    "column key {:?} appears more than once in {}",
                    column.key,
                    path.display()
                );
            }
        }

        Ok(())
    }

    pub fn row_key(&self) -> String {
        self.table
            .row_key
            .clone()
            .unwrap_or_else(|| DEFAULT_ROW_KEY.to_owned())
    }

    pub fn resizable(&self) -> bool {
        self.table.resizable.unwrap_or(true)
    }

    pub fn page_size(&self) -> u64 {
        self.query.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    // Falls back to the stock bill-list set when the config names no
    // columns.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        if self.columns.is_empty() {
            expense_columns()
        } else {
            self.columns.clone()
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            r#"# lacuenta config ({})
version = 1

[table]
# Field that uniquely addresses a row within a page.
row_key = "id"
# Wrap column headers with drag-resize handles.
resizable = true

[query]
page_size = 10

# Omit [[columns]] to use the stock bill columns.
#
# [[columns]]
# key = "user"
# title = "user"
#
# [[columns]]
# key = "money"
# title = "amount"
# summable = true
# editable = true
# input_kind = "number"
# width = 120
"#,
            path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_PAGE_SIZE};
    use anyhow::Result;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).expect("write test config");
        path
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let config = Config::load(&PathBuf::from("/definitely/not/here.toml"))?;
        assert_eq!(config.row_key(), "id");
        assert!(config.resizable());
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!config.columns().is_empty());
        Ok(())
    }

    #[test]
    fn full_config_round_trips() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(
            &dir,
            r#"
version = 1

[table]
row_key = "key"
resizable = false

[query]
page_size = 25

[[columns]]
key = "user"
title = "user"
editable = true

[[columns]]
key = "money"
title = "amount"
summable = true
input_kind = "number"
width = 120
"#,
        );

        let config = Config::load(&path)?;
        assert_eq!(config.row_key(), "key");
        assert!(!config.resizable());
        assert_eq!(config.page_size(), 25);

        let columns = config.columns();
        assert_eq!(columns.len(), 2);
        assert!(columns[0].editable);
        assert!(columns[0].required);
        assert_eq!(columns[1].width, Some(120));
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[table]\nrow_key = \"id\"\n");

        let error = Config::load(&path).expect_err("unversioned config should fail");
        assert!(error.to_string().contains("not versioned"));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "version = 9\n");

        let error = Config::load(&path).expect_err("wrong version should fail");
        assert!(error.to_string().contains("unsupported config version"));
    }

    #[test]
    fn duplicate_column_keys_are_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            r#"
version = 1

[[columns]]
key = "user"
title = "user"

[[columns]]
key = "user"
title = "user again"
"#,
        );

        let error = Config::load(&path).expect_err("duplicate keys should fail");
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "version = 1\n\n[query]\npage_size = 0\n");

        let error = Config::load(&path).expect_err("zero page size should fail");
        assert!(error.to_string().contains("must be positive"));
    }

    #[test]
    fn example_config_parses_and_validates() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, Config::example_config(&path))?;

        let config = Config::load(&path)?;
        assert_eq!(config.version, 1);
        assert_eq!(config.row_key(), "id");
        Ok(())
    }
}
