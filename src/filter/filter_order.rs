use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, OrderTarget};

pub struct FilterOrder;

impl FilterOrder {
    pub fn validate(info: &FilterOrderInfo) -> Result<(), FilterError> {
        match &info.target {
            OrderTarget::Column(column) => FilterWhere::validate_column(column),
            OrderTarget::JsonField { column, key } => {
                FilterWhere::validate_column(column)?;
                // The key is inlined as a literal, so it gets the same identifier check
                FilterWhere::validate_column(key)
            }
        }
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| match &i.target {
                OrderTarget::Column(column) => {
                    format!("\"{}\" {} {}", column, i.sort.to_sql(), i.sort.nulls_sql())
                }
                OrderTarget::JsonField { column, key } => {
                    format!("\"{}\" -> '{}' {} {}", column, key, i.sort.to_sql(), i.sort.nulls_sql())
                }
            })
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
