//! Column extraction helpers for the plain-Rust kernels.

use crate::error::Result;
use polars::prelude::*;

pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(s.f64()?.into_iter().collect())
}

pub(crate) fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let s = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    Ok(s.i64()?.into_iter().collect())
}

pub(crate) fn i32_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let s = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(s.i32()?.into_iter().collect())
}
