//! Renders a page object class for `@playwright/test`

use std::fmt;

use super::naming::sanitize_identifier;
use super::types::{ElementCategory, GeneratedModel, PageObjectRecord, FALLBACK_TOKEN};

const INDENT: &str = "  ";

/// Class name for a page title: `"Test Page"` becomes `TestPagePage`
pub fn class_name_for_title(title: &str) -> String {
    let base = sanitize_identifier(title);
    if base.is_empty() {
        format!("{}Page", FALLBACK_TOKEN)
    } else {
        format!("{}Page", base)
    }
}

impl GeneratedModel {
    pub fn new(title: &str, url: &str, records: Vec<PageObjectRecord>) -> Self {
        Self {
            class_name: class_name_for_title(title),
            url: url.to_string(),
            records,
        }
    }

    /// Render the class source text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import {{ Page, Locator }} from '@playwright/test';")?;
        writeln!(f)?;
        writeln!(f, "export class {} {{", self.class_name)?;

        // Fields
        writeln!(f, "{INDENT}readonly page: Page;")?;
        for record in &self.records {
            writeln!(f, "{INDENT}readonly {}: Locator;", record.name)?;
        }
        writeln!(f)?;

        // Constructor
        writeln!(f, "{INDENT}constructor(page: Page) {{")?;
        writeln!(f, "{INDENT}{INDENT}this.page = page;")?;
        for record in &self.records {
            writeln!(
                f,
                "{INDENT}{INDENT}this.{} = page.locator({});",
                record.name,
                quote(&record.locator)
            )?;
        }
        writeln!(f, "{INDENT}}}")?;
        writeln!(f)?;

        // Navigation
        writeln!(f, "{INDENT}async navigate() {{")?;
        writeln!(f, "{INDENT}{INDENT}await this.page.goto({});", quote(&self.url))?;
        writeln!(f, "{INDENT}}}")?;

        for record in &self.records {
            writeln!(f)?;
            write_methods(f, record)?;
        }

        writeln!(f, "}}")
    }
}

fn write_methods(f: &mut fmt::Formatter<'_>, record: &PageObjectRecord) -> fmt::Result {
    let name = &record.name;
    match record.category {
        ElementCategory::Input => {
            writeln!(f, "{INDENT}async fill{name}(value: string) {{")?;
            writeln!(f, "{INDENT}{INDENT}await this.{name}.fill(value);")?;
            writeln!(f, "{INDENT}}}")?;
            writeln!(f)?;
            writeln!(f, "{INDENT}async get{name}Value(): Promise<string> {{")?;
            writeln!(f, "{INDENT}{INDENT}return await this.{name}.inputValue();")?;
            writeln!(f, "{INDENT}}}")
        }
        ElementCategory::Button | ElementCategory::Link => {
            writeln!(f, "{INDENT}async click{name}() {{")?;
            writeln!(f, "{INDENT}{INDENT}await this.{name}.click();")?;
            writeln!(f, "{INDENT}}}")
        }
    }
}

/// Single-quoted TypeScript string literal
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
