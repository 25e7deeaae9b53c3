//! Field alias table mapping printed label variants to data keys.

mod rewrite;

use std::collections::HashMap;

use crate::error::{Error, Result};
use rewrite::RuleSet;

/// Built-in alias table for Vietnamese identity-document forms.
///
/// The table is scanned in order; within one node the first variant found in
/// the text with a value present in the data map is the one rewritten.
const STANDARD_FIELDS: &[(&str, &str)] = &[
    // so_cccd
    ("Số CCCD", "so_cccd"),
    ("CCCD", "so_cccd"),
    ("Căn cước công dân", "so_cccd"),
    ("Số căn cước", "so_cccd"),
    ("Số căn cước công dân", "so_cccd"),
    ("Số CMND hoặc căn cước công dân", "so_cccd"),
    // so_cmnd
    ("Số CMND", "so_cmnd"),
    ("CMND", "so_cmnd"),
    ("Chứng minh nhân dân", "so_cmnd"),
    ("Số chứng minh", "so_cmnd"),
    ("Số chứng minh nhân dân", "so_cmnd"),
    // ho_ten
    ("Họ và tên", "ho_ten"),
    ("Họ, chữ đệm, tên", "ho_ten"),
    ("Họ tên", "ho_ten"),
    ("Họ, chữ đệm, tên người yêu cầu", "ho_ten"),
    ("Tên", "ho_ten"),
    // gioi_tinh
    ("Giới tính", "gioi_tinh"),
    ("Phái", "gioi_tinh"),
    ("Nam/Nữ", "gioi_tinh"),
    // ngay_sinh
    ("Ngày sinh", "ngay_sinh"),
    ("Ngày, tháng, năm sinh", "ngay_sinh"),
    ("Sinh ngày", "ngay_sinh"),
    ("Năm sinh", "ngay_sinh"),
    // noi_cu_tru
    ("Nơi cư trú", "noi_cu_tru"),
    ("Địa chỉ cư trú", "noi_cu_tru"),
    ("Chỗ ở hiện tại", "noi_cu_tru"),
    ("Địa chỉ", "noi_cu_tru"),
    // ngay_cap_cccd
    ("Ngày cấp CCCD", "ngay_cap_cccd"),
    ("Ngày cấp", "ngay_cap_cccd"),
    ("Cấp ngày", "ngay_cap_cccd"),
    ("Ngày cấp căn cước", "ngay_cap_cccd"),
];

/// One alias: a printed label variant, the data key it fills from, and the
/// rewrite rules compiled for the label.
#[derive(Debug, Clone)]
struct FieldEntry {
    variant: String,
    key: String,
    rules: RuleSet,
}

/// Ordered table of label variants and the data keys they fill from.
#[derive(Debug, Clone)]
pub struct FieldTable {
    entries: Vec<FieldEntry>,
}

impl FieldTable {
    /// Builds the built-in table for Vietnamese identity documents.
    pub fn standard() -> Self {
        let pairs = STANDARD_FIELDS
            .iter()
            .map(|&(variant, key)| (variant.to_string(), key.to_string()));
        Self::from_pairs(pairs).expect("built-in alias table is valid")
    }

    /// Builds a table from `(variant, key)` pairs, keeping their order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = Vec::new();
        for (variant, key) in pairs {
            if variant.trim().is_empty() {
                return Err(Error::InvalidAlias("empty label variant".to_string()));
            }
            if key.trim().is_empty() {
                return Err(Error::InvalidAlias(format!(
                    "empty data key for label {variant:?}"
                )));
            }
            let rules = RuleSet::compile(&variant)
                .map_err(|e| Error::InvalidAlias(format!("label {variant:?}: {e}")))?;
            entries.push(FieldEntry {
                variant,
                key,
                rules,
            });
        }
        Ok(Self { entries })
    }

    /// Number of aliases in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrites one node's text against the table.
    ///
    /// Aliases are scanned in table order. The first alias whose label occurs
    /// in the text, whose key has a value in `data`, and whose rules match
    /// produces the result; later aliases are not tried. Blank text is never
    /// touched. Returns `None` when nothing matched.
    pub fn rewrite(&self, text: &str, data: &HashMap<String, String>) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        for entry in &self.entries {
            if !text.contains(entry.variant.as_str()) {
                continue;
            }
            let value = match data.get(entry.key.as_str()) {
                Some(value) => value,
                None => continue,
            };
            if let Some(rewritten) = entry.rules.apply(text, value) {
                return Some(rewritten);
            }
        }
        None
    }
}
