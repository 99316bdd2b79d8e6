//! Integration tests for the file loaders.

use crsp_data::{
    DataError, Exchange, Universe, UniverseFilter, load_decile_benchmark, load_fama_french,
    load_stocks,
};
use polars::prelude::*;
use std::path::PathBuf;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("crsp_data_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_stocks_from_file_and_filter() {
    let path = write_temp(
        "stocks.csv",
        "\
PERMNO,date,SHRCD,EXCHCD,RET,DLRET,PRC,SHROUT
10001,1990-01-31,10,1,0.01,,20,100
10002,1990-01-31,12,1,0.02,,10,100
10003,1990-01-31,11,4,0.03,,5,100
10004,1990-01-31,11,3,B,,-5,100
",
    );

    let df = load_stocks(&path).unwrap();
    assert_eq!(df.height(), 4);

    let filter = UniverseFilter::default();
    let kept = df.lazy().filter(filter.predicate()).collect().unwrap();
    let permnos: Vec<Option<i64>> = kept
        .column("permno")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(permnos, vec![Some(10001), Some(10004)]);

    let nyse_only = UniverseFilter::only(Exchange::Nyse);
    assert!(nyse_only.admits(Some(10), Some(1)));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_missing_file() {
    let result = load_stocks("/nonexistent/crsp/stocks.csv");
    assert!(matches!(result, Err(DataError::Csv(_)) | Err(DataError::Io(_))));
}

#[test]
fn test_load_fama_french_and_benchmark_files() {
    let ff = write_temp(
        "ff.csv",
        "\
,Mkt-RF,SMB,HML,RF
192701,-0.05,-0.3,4.58,0.25
192702,4.17,-0.03,2.72,0.26
",
    );
    let bench = write_temp(
        "dm.csv",
        "year,month,decile,ret\n1927,1,1,-0.02\n1927,1,2,0.01\n",
    );

    let factors = load_fama_french(&ff).unwrap();
    assert_eq!(factors.height(), 2);

    let deciles = load_decile_benchmark(&bench).unwrap();
    assert_eq!(deciles.height(), 2);
    assert_eq!(
        deciles.get_column_names(),
        vec!["year", "month", "decile", "ret"]
    );

    std::fs::remove_file(ff).ok();
    std::fs::remove_file(bench).ok();
}
