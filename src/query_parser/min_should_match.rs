//! Minimum should match (`mm`) specifications
//!
//! Supported forms, evaluated against the number of optional clauses:
//!
//!  - `3`: at least three clauses
//!  - `-2`: all but two clauses
//!  - `75%`: 75% of the clauses, rounded down
//!  - `-25%`: all but 25% of the clauses, rounded down
//!  - `2<-25% 9<-3`: conditional. With two or fewer clauses all are required, then
//!    `-25%` applies up to nine clauses, then `-3` beyond that

use crate::params;
use crate::query_parser::ParamError;


#[derive(Debug, Clone, PartialEq)]
pub enum MinShouldMatch {
    Count(i32),
    Percentage(i32),

    /// `(upper_bound, spec)` pairs. A spec applies when the clause count is above its bound
    Conditional(Vec<(u32, MinShouldMatch)>),
}


fn parse_simple(spec: &str, original: &str) -> Result<MinShouldMatch, ParamError> {
    let spec = spec.trim();

    if let Some(percentage) = spec.strip_suffix('%') {
        return match percentage.trim().parse::<i32>() {
            Ok(percentage) => Ok(MinShouldMatch::Percentage(percentage)),
            Err(_) => Err(ParamError::new(params::MM, original, "expected a percentage like '75%'")),
        };
    }

    match spec.parse::<i32>() {
        Ok(count) => Ok(MinShouldMatch::Count(count)),
        Err(_) => Err(ParamError::new(params::MM, original, "expected an integer or a percentage")),
    }
}


impl MinShouldMatch {
    pub fn parse(spec: &str) -> Result<MinShouldMatch, ParamError> {
        if !spec.contains('<') {
            return parse_simple(spec, spec);
        }

        // "2 < 50%" is the same as "2<50%"
        let compact = spec.split('<').map(str::trim).collect::<Vec<_>>().join("<");

        let mut conditions = Vec::new();
        for condition in compact.split_whitespace() {
            let mut parts = condition.splitn(2, '<');
            let upper_bound = parts.next().unwrap_or("");
            let condition_spec = match parts.next() {
                Some(condition_spec) => condition_spec,
                None => return Err(ParamError::new(params::MM, spec, "expected 'N<spec' conditions")),
            };

            let upper_bound = match upper_bound.parse::<u32>() {
                Ok(upper_bound) => upper_bound,
                Err(_) => return Err(ParamError::new(params::MM, spec, "expected an integer before '<'")),
            };

            conditions.push((upper_bound, parse_simple(condition_spec, spec)?));
        }

        Ok(MinShouldMatch::Conditional(conditions))
    }

    /// The number of optional clauses that must match, between 0 and `optional_clauses`
    pub fn calculate(&self, optional_clauses: u32) -> u32 {
        let count = optional_clauses as i64;

        let result = match *self {
            MinShouldMatch::Count(value) => {
                let value = value as i64;
                if value < 0 { count + value } else { value }
            }
            MinShouldMatch::Percentage(percentage) => {
                // Truncates towards zero, so -25% of 3 clauses leaves all 3 required
                let product = count * percentage as i64;
                if product < 0 { count + product / 100 } else { product / 100 }
            }
            MinShouldMatch::Conditional(ref conditions) => {
                let mut result = optional_clauses;

                for &(upper_bound, ref spec) in conditions.iter() {
                    if optional_clauses <= upper_bound {
                        break;
                    }

                    result = spec.calculate(optional_clauses);
                }

                result as i64
            }
        };

        result.max(0).min(count) as u32
    }
}


impl Default for MinShouldMatch {
    /// All optional clauses are required
    fn default() -> MinShouldMatch {
        MinShouldMatch::Percentage(100)
    }
}
