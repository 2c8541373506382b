use serde_json::Value;

use super::error::FilterError;
use super::types::FilterCondition;
use crate::types::is_identifier;

pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Renders `AND`-joined equality predicates with positional parameters.
    /// An empty condition list yields an empty clause.
    pub fn generate(conditions: &[FilterCondition], starting_param_index: usize) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        let mut sql_conditions = Vec::with_capacity(conditions.len());
        for condition in conditions {
            sql_conditions.push(filter_where.build_sql_condition(condition)?);
        }
        Ok((sql_conditions.join(" AND "), filter_where.param_values))
    }

    pub fn validate_column(column: &str) -> Result<(), FilterError> {
        if is_identifier(column) {
            Ok(())
        } else {
            Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)))
        }
    }

    fn build_sql_condition(&mut self, condition: &FilterCondition) -> Result<String, FilterError> {
        Self::validate_column(&condition.column)?;
        let quoted_column = format!("\"{}\"", condition.column);
        if condition.data.is_null() {
            Ok(format!("{} IS NULL", quoted_column))
        } else {
            Ok(format!("{} = {}", quoted_column, self.param(condition.data.clone())))
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
