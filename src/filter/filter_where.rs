use super::types::SqlParam;

/// Accumulates AND-joined predicates and numbers their bind parameters.
///
/// Placeholders are allocated in call order, so the same sequence of calls
/// always yields the same SQL and the same parameter vector.
#[derive(Debug, Default)]
pub struct FilterWhere {
    params: Vec<SqlParam>,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return its `$n` placeholder.
    pub fn param(&mut self, value: SqlParam) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub fn eq(&mut self, column: &str, value: SqlParam) -> &mut Self {
        let placeholder = self.param(value);
        self.conditions.push(format!("{} = {}", column, placeholder));
        self
    }

    pub fn compare(&mut self, column: &str, op: &'static str, value: SqlParam) -> &mut Self {
        let placeholder = self.param(value);
        self.conditions.push(format!("{} {} {}", column, op, placeholder));
        self
    }

    /// `(column = $a OR column = $b ...)`, one parameter per value.
    pub fn any_of(&mut self, column: &str, values: impl IntoIterator<Item = SqlParam>) -> &mut Self {
        let parts: Vec<String> = values
            .into_iter()
            .map(|v| format!("{} = {}", column, self.param(v)))
            .collect();
        match parts.len() {
            0 => {}
            1 => self.conditions.extend(parts),
            _ => self.conditions.push(format!("({})", parts.join(" OR "))),
        }
        self
    }

    /// Case-insensitive substring match across columns with a single bound pattern.
    pub fn ilike_any(&mut self, columns: &[&str], term: &str) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let placeholder = self.param(SqlParam::Text(format!("%{}%", escape_like(term))));
        let parts: Vec<String> = columns
            .iter()
            .map(|c| format!("{} ILIKE {}", c, placeholder))
            .collect();
        self.conditions.push(format!("({})", parts.join(" OR ")));
        self
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn into_params(self) -> Vec<SqlParam> {
        self.params
    }
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
