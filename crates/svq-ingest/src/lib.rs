pub mod csv_table;
pub mod questionnaire;
pub mod values;

pub use csv_table::{dataframe_from_columns, read_survey_csv};
pub use questionnaire::{QuestionnaireMarkers, parse_questionnaire, parse_questionnaire_file};
pub use values::{cell_f64, cell_str, format_numeric, is_missing_cell, parse_f64};
