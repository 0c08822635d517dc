use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Bill denominations counted at the end of a shift, largest first.
pub const DENOMINATIONS: [u32; 10] = [20000, 10000, 2000, 1000, 500, 200, 100, 50, 20, 10];

pub const CASH_COUNT_STORAGE_KEY: &str = "billCounts";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CashCountError {
    #[error("There are no {0} bills")]
    UnknownDenomination(u32),
}

/// Number of bills per denomination.
#[derive(Debug, Clone, PartialEq)]
pub struct CashCount {
    counts: BTreeMap<u32, u32>,
}

impl Default for CashCount {
    fn default() -> Self {
        Self {
            counts: DENOMINATIONS.iter().map(|denomination| (*denomination, 0)).collect(),
        }
    }
}

impl CashCount {
    pub fn count(&self, denomination: u32) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn subtotal(&self, denomination: u32) -> u64 {
        u64::from(self.count(denomination)) * u64::from(denomination)
    }

    pub fn total(&self) -> u64 {
        DENOMINATIONS
            .iter()
            .map(|denomination| self.subtotal(*denomination))
            .sum()
    }

    /// Only whole, non-negative counts are kept: the leading integer of the
    /// input is used and anything else counts as zero.
    pub fn set_count(&mut self, denomination: u32, raw_input: &str) -> Result<u32, CashCountError> {
        let count = self
            .counts
            .get_mut(&denomination)
            .ok_or(CashCountError::UnknownDenomination(denomination))?;
        *count = parse_count(raw_input);
        Ok(*count)
    }

    pub fn clear(&mut self) {
        self.counts.values_mut().for_each(|count| *count = 0);
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        let counts: BTreeMap<String, u32> = self
            .counts
            .iter()
            .map(|(denomination, count)| (denomination.to_string(), *count))
            .collect();
        serde_json::to_string(&counts)
    }

    /// Older snapshots store an empty string for zero and may keep counts as
    /// text. Unreadable snapshots load as all zeros.
    pub fn decode(contents: &str) -> Self {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StoredCount {
            Number(f64),
            Text(String),
        }

        let stored = match serde_json::from_str::<BTreeMap<String, Option<StoredCount>>>(contents)
        {
            Ok(stored) => stored,
            Err(err) => {
                warn!(%err, "Discarding unreadable cash count snapshot");
                return Self::default();
            }
        };
        let mut cash_count = Self::default();
        for (denomination, count) in stored {
            let Ok(denomination) = denomination.parse::<u32>() else {
                continue;
            };
            let count = match count {
                Some(StoredCount::Number(count)) if count.is_finite() && count > 0.0 => {
                    count.trunc() as u32
                }
                Some(StoredCount::Text(text)) => parse_count(&text),
                _ => 0,
            };
            if let Some(slot) = cash_count.counts.get_mut(&denomination) {
                *slot = count;
            }
        }
        cash_count
    }
}

fn parse_count(raw_input: &str) -> u32 {
    let trimmed = raw_input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = digits.chars().take_while(char::is_ascii_digit).collect();
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn total_is_the_sum_of_subtotals() -> anyhow::Result<()> {
        let mut cash_count = CashCount::default();
        cash_count.set_count(20000, "3")?;
        cash_count.set_count(500, "7")?;
        cash_count.set_count(10, "1")?;
        assert_eq!(60000, cash_count.subtotal(20000));
        assert_eq!(63510, cash_count.total());
        Ok(())
    }

    #[test]
    fn set_count_keeps_the_leading_whole_number() -> anyhow::Result<()> {
        let mut cash_count = CashCount::default();
        assert_eq!(12, cash_count.set_count(100, " 12abc")?);
        assert_eq!(4, cash_count.set_count(100, "4.9")?);
        assert_eq!(0, cash_count.set_count(100, "-3")?);
        assert_eq!(0, cash_count.set_count(100, "")?);
        assert_eq!(0, cash_count.set_count(100, "x")?);
        Ok(())
    }

    #[test]
    fn set_count_rejects_unknown_denominations() {
        let mut cash_count = CashCount::default();
        assert_eq!(
            Err(CashCountError::UnknownDenomination(5)),
            cash_count.set_count(5, "1")
        );
    }

    #[test]
    fn clear_zeroes_every_denomination() -> anyhow::Result<()> {
        let mut cash_count = CashCount::default();
        cash_count.set_count(1000, "9")?;
        cash_count.clear();
        assert_eq!(CashCount::default(), cash_count);
        assert_eq!(0, cash_count.total());
        Ok(())
    }

    #[test]
    fn decode_reads_what_encode_writes() -> anyhow::Result<()> {
        let mut cash_count = CashCount::default();
        cash_count.set_count(2000, "15")?;
        cash_count.set_count(50, "2")?;
        assert_eq!(cash_count, CashCount::decode(&cash_count.encode()?));
        Ok(())
    }

    #[test]
    fn decode_accepts_legacy_text_counts() {
        let cash_count =
            CashCount::decode(r#"{"20000": "", "10000": "2", "1000": 3, "7": 4, "200": null}"#);
        assert_eq!(0, cash_count.count(20000));
        assert_eq!(2, cash_count.count(10000));
        assert_eq!(3, cash_count.count(1000));
        assert_eq!(0, cash_count.count(200));
        assert_eq!(23000, cash_count.total());
    }

    #[test]
    fn decode_falls_back_to_zero_on_garbage() {
        assert_eq!(CashCount::default(), CashCount::decode("[1, 2]"));
        assert_eq!(CashCount::default(), CashCount::decode("{"));
    }
}
