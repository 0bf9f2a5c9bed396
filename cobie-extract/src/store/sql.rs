//! SQL text builders
//!
//! Only identifiers end up in statement text. Values always go through `?`
//! placeholders.

use crate::schema::TableSchema;

/// Quote an identifier, doubling any embedded double quote
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

pub fn build_create_table_sql(schema: &TableSchema) -> String {
    let column_defs = schema
        .columns
        .iter()
        .map(|column| {
            let mut def = format!("{} {}", quote_identifier(&column.name), column.column_type.sql());
            if column.primary_key {
                def.push_str(" PRIMARY KEY");
            }
            def
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE {} ({})", quote_identifier(&schema.name), column_defs)
}

/// INSERT for the given columns; no columns means a row of defaults
pub fn build_insert_sql<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
    }

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        quote_column_list(columns),
        build_placeholders(columns.len())
    )
}
