//! Column access shared by the table builders.

use crsp_data::YearMonth;
use crsp_data::columns::{MONTH, YEAR};
use polars::prelude::*;

pub(crate) fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let s = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(s.f64()?.into_iter().collect())
}

pub(crate) fn i32_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i32>>> {
    let s = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(s.i32()?.into_iter().collect())
}

/// Month key of every row; `None` where year or month is null or invalid.
pub(crate) fn months(df: &DataFrame) -> PolarsResult<Vec<Option<YearMonth>>> {
    let year = i32_values(df, YEAR)?;
    let month = i32_values(df, MONTH)?;
    Ok(year
        .into_iter()
        .zip(month)
        .map(|(y, m)| match (y, m) {
            (Some(y), Some(m)) if m > 0 => YearMonth::new(y, m as u32).ok(),
            _ => None,
        })
        .collect())
}

/// First and last month present.
pub(crate) fn span(months: &[Option<YearMonth>]) -> Option<(YearMonth, YearMonth)> {
    let present = months.iter().flatten();
    Some((*present.clone().min()?, *present.max()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_and_span() {
        let df = df! {
            "year" => [Some(1927i32), Some(1926), None, Some(1927)],
            "month" => [Some(3i32), Some(7), Some(1), Some(13)],
        }
        .unwrap();
        let months = months(&df).unwrap();
        assert_eq!(months[2], None);
        assert_eq!(months[3], None);
        let (first, last) = span(&months).unwrap();
        assert_eq!(first.to_string(), "1926-07");
        assert_eq!(last.to_string(), "1927-03");
        assert!(span(&[None]).is_none());
    }
}
