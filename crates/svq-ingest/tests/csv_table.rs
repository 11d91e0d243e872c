use std::io::Write;

use polars::prelude::AnyValue;

use svq_ingest::{cell_str, read_survey_csv};

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file
}

#[test]
fn reads_survey_export() {
    let file = write_csv(
        "\u{feff}ExternalId,duration,QA1,QA2__1\n\
         r1,0:05:30,Dobrý produkt,3\n\
         r2,0:01:10,nevím,3\n",
    );
    let df = read_survey_csv(file.path()).expect("read csv");

    assert_eq!(df.height(), 2);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, ["ExternalId", "duration", "QA1", "QA2__1"]);

    let id = df.column("ExternalId").expect("id column");
    assert_eq!(cell_str(id.get(0).unwrap_or(AnyValue::Null)), "r1");
}

#[test]
fn short_rows_are_padded() {
    let file = write_csv("ExternalId,QA1,QA2\nr1,ano\nr2,ne,text\n");
    let df = read_survey_csv(file.path()).expect("read csv");

    assert_eq!(df.height(), 2);
    let qa2 = df.column("QA2").expect("QA2 column");
    assert_eq!(cell_str(qa2.get(0).unwrap_or(AnyValue::Null)), "");
    assert_eq!(cell_str(qa2.get(1).unwrap_or(AnyValue::Null)), "text");
}

#[test]
fn empty_file_is_an_error() {
    let file = write_csv("");
    assert!(read_survey_csv(file.path()).is_err());
}
