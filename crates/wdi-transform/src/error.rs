use thiserror::Error;

/// A raw table does not match any accepted schema variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error(
        "table '{table}' has no country column (expected one of: {}; found {} columns)",
        .candidates.join(", "),
        .found.len()
    )]
    MissingCountryColumn {
        table: String,
        candidates: Vec<String>,
        found: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_table_and_candidates() {
        let err = SchemaError::MissingCountryColumn {
            table: "population".to_string(),
            candidates: vec!["country".to_string(), "Country Name".to_string()],
            found: vec!["nation".to_string(), "2000".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "table 'population' has no country column \
             (expected one of: country, Country Name; found 2 columns)"
        );
    }
}
