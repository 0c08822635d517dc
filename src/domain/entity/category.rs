use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(
    Serialize, Deserialize, Debug, PartialEq, Ord, PartialOrd, Eq, Hash, Clone, Copy, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Category {
    Cheques,
    Debitos,
    Transferencias,
    Qr,
    PagosMunicipales,
    Varios,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Cheques,
        Category::Debitos,
        Category::Transferencias,
        Category::Qr,
        Category::PagosMunicipales,
        Category::Varios,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheques => "cheques",
            Self::Debitos => "debitos",
            Self::Transferencias => "transferencias",
            Self::Qr => "qr",
            Self::PagosMunicipales => "pagos_municipales",
            Self::Varios => "varios",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cheques => "Cheques",
            Self::Debitos => "Débitos",
            Self::Transferencias => "Vales - transf.",
            Self::Qr => "QR",
            Self::PagosMunicipales => "Pagos Municipales",
            Self::Varios => "Varios",
        }
    }

    /// Key under which the ledger snapshot of this category is stored.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Cheques => "chequeTransactions",
            Self::Debitos => "debitTransactions",
            Self::Transferencias => "transferenciaTransactions",
            Self::Qr => "qrTransactions",
            Self::PagosMunicipales => "pagosMunicipalesTransactions",
            Self::Varios => "variosTransactions",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| {
                anyhow!(
                    "Unknown category `{s}`, expected one of {}",
                    Self::ALL.iter().map(Category::as_str).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_str_matches_serde_names() -> anyhow::Result<()> {
        for category in Category::ALL {
            let from_serde: Category =
                serde_json::from_value(serde_json::Value::String(category.as_str().into()))?;
            assert_eq!(category, from_serde);
            assert_eq!(category, category.as_str().parse()?);
        }
        Ok(())
    }

    #[test]
    fn from_str_lists_the_valid_categories_on_error() {
        let error = "egresos".parse::<Category>().unwrap_err().to_string();
        assert!(error.contains("pagos_municipales"));
    }
}
