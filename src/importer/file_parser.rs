// ==========================================
// 员工档案管理 - 分隔文本解析器实现
// ==========================================
// 支持: 逗号 / 制表符分隔（由表头行是否含制表符决定）
// 流程: 整体解码 → 拆行 → 选分隔符 → 表头校验 → 逐行映射 → 行过滤
// ==========================================

use crate::domain::employee::Employee;
use crate::importer::employee_importer_trait::{EmployeeFileParser, FieldMapper, RowFilter};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::field_mapper::{EmployeeFieldMapper, REQUIRED_HEADERS};
use crate::importer::row_filter::EmployeeRowFilter;
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

const UTF8_BOM: char = '\u{feff}';

/// 按 CR / LF 拆行，丢弃空行
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect()
}

/// 选择分隔符：表头行含制表符 → 制表符，否则逗号
pub fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// 校验必需表头
///
/// # 规则
/// 1. 先区分大小写匹配
/// 2. 有缺失时整体改为小写再匹配一次
/// 3. 仍有缺失 → MissingRequiredHeaders（列出小写表头名）
pub fn validate_headers(headers: &[String]) -> ImporterResult<()> {
    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|h| !headers.iter().any(|found| found == h))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    warn!(missing = %missing.join(", "), "Missing required headers");

    let headers_lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let missing_lower: Vec<String> = REQUIRED_HEADERS
        .iter()
        .map(|h| h.to_lowercase())
        .filter(|h| !headers_lower.contains(h))
        .collect();

    if missing_lower.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingRequiredHeaders(missing_lower))
    }
}

// ==========================================
// DelimitedEmployeeParser - 分隔文本解析器
// ==========================================
pub struct DelimitedEmployeeParser {
    field_mapper: Box<dyn FieldMapper>,
    row_filter: Box<dyn RowFilter>,
}

impl DelimitedEmployeeParser {
    pub fn new(field_mapper: Box<dyn FieldMapper>, row_filter: Box<dyn RowFilter>) -> Self {
        Self {
            field_mapper,
            row_filter,
        }
    }
}

impl Default for DelimitedEmployeeParser {
    fn default() -> Self {
        Self::new(Box::new(EmployeeFieldMapper), Box::new(EmployeeRowFilter))
    }
}

impl EmployeeFileParser for DelimitedEmployeeParser {
    fn parse_at(&self, content: &[u8], now: NaiveDateTime) -> ImporterResult<Vec<Employee>> {
        // === 步骤 1: 整体解码（非法字节替换为 U+FFFD，不丢行）===
        let text = String::from_utf8_lossy(content);
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);

        // === 步骤 2: 拆行 ===
        let lines = split_lines(text);
        if lines.len() < 2 {
            return Err(ImportError::NoData);
        }

        // === 步骤 3: 分隔符 ===
        let delimiter = detect_delimiter(lines[0]);
        let delimiter_name = if delimiter == b'\t' { "tab" } else { "comma" };
        info!(delimiter = delimiter_name, "Using delimiter");

        // === 步骤 4: 表头 ===
        let headers: Vec<String> = lines[0]
            .split(delimiter as char)
            .map(str::to_string)
            .collect();
        info!(headers = %headers.join(", "), "Found headers");

        validate_headers(&headers)?;
        let columns = self.field_mapper.resolve_columns(&headers);

        // === 步骤 5: 数据行 ===
        // 纯空白行不参与解析；每个非空行对应一条 CSV 记录
        let data_lines: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx, *line))
            .collect();

        let joined = data_lines
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(joined.as_bytes());

        let mut employees = Vec::new();
        for ((line_number, raw_line), result) in data_lines.iter().zip(reader.records()) {
            let line_number = *line_number;
            debug!(line_number, line = %raw_line, "Processing line");

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(line_number, error = %e, "Error processing line");
                    continue;
                }
            };

            let employee = self.field_mapper.map_row(&columns, &record);

            if let Some(reason) = self.row_filter.check(&employee, now) {
                warn!(
                    line_number,
                    payroll_number = %employee.payroll_number,
                    date_of_birth = ?employee.date_of_birth,
                    start_date = ?employee.start_date,
                    reason = %reason,
                    "Skipping line"
                );
                continue;
            }

            debug!(
                payroll_number = %employee.payroll_number,
                name = %employee.display_name(),
                "Successfully parsed employee"
            );
            employees.push(employee);
        }

        info!(count = employees.len(), "Finished parsing file");
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "Personnel_Records.Payroll_Number,Personnel_Records.Forenames,\
        Personnel_Records.Surname,Personnel_Records.Date_of_Birth,\
        Personnel_Records.Start_Date";

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn parse(content: &str) -> ImporterResult<Vec<Employee>> {
        DelimitedEmployeeParser::default().parse_at(content.as_bytes(), now())
    }

    #[test]
    fn test_split_lines_drops_empty() {
        let lines = split_lines("a\r\n\r\nb\rc\n");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_detect_delimiter_presence_only() {
        assert_eq!(detect_delimiter("a,b,c\td"), b'\t');
        assert_eq!(detect_delimiter("a,b,c"), b',');
    }

    #[test]
    fn test_single_valid_row() {
        let employees =
            parse(&format!("{}\nPI123,John,Doe,01/01/1980,01/01/2020", HEADER)).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].payroll_number, "PI123");
        assert_eq!(employees[0].date_of_birth, NaiveDate::from_ymd_opt(1980, 1, 1));
        assert_eq!(employees[0].start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn test_no_data() {
        assert!(matches!(parse(""), Err(ImportError::NoData)));
        assert!(matches!(parse(HEADER), Err(ImportError::NoData)));
        assert!(matches!(parse(&format!("{}\r\n\r\n", HEADER)), Err(ImportError::NoData)));
    }

    #[test]
    fn test_missing_header_lists_lowercase_names() {
        let header = "Personnel_Records.Payroll_Number,Personnel_Records.Forenames,\
            Personnel_Records.Surname,Personnel_Records.Start_Date";
        let err = parse(&format!("{}\nPI123,John,Doe,01/01/2020", header)).unwrap_err();
        match err {
            ImportError::MissingRequiredHeaders(missing) => {
                assert_eq!(missing, vec!["personnel_records.date_of_birth".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_case_variants_accepted() {
        let employees = parse(&format!(
            "{}\nPI123,John,Doe,01/01/1980,01/01/2020",
            HEADER.to_uppercase()
        ))
        .unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].surname, "Doe");
    }

    #[test]
    fn test_bom_is_stripped() {
        let employees = parse(&format!(
            "\u{feff}{}\nPI123,John,Doe,01/01/1980,01/01/2020",
            HEADER
        ))
        .unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[test]
    fn test_tab_header_drives_data_split() {
        let header = HEADER.replace(',', "\t");
        let employees = parse(&format!(
            "{}\nPI123\tJohn\tDoe, Jr\t01/01/1980\t01/01/2020",
            header
        ))
        .unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].surname, "Doe, Jr");
    }

    #[test]
    fn test_skip_rules_keep_order() {
        let content = format!(
            "{}\n,Empty,Payroll,01/01/1980,01/01/2020\n\
             PI1,Ann,First,01/01/1980,01/01/2020\n\
             PI2,Baby,Future,16/06/2024,01/01/2020\n\
             PI3,New,Starter,01/01/1990,01/07/2024\n\
             PI4,Bob,Last,02/02/1975,  \n",
            HEADER
        );
        let employees = parse(&content).unwrap();
        let payrolls: Vec<&str> = employees.iter().map(|e| e.payroll_number.as_str()).collect();
        assert_eq!(payrolls, vec!["PI1", "PI4"]);
        assert_eq!(employees[1].start_date, None);
    }

    #[test]
    fn test_invalid_utf8_bytes_replaced_not_dropped() {
        let mut content = format!("{}\n", HEADER).into_bytes();
        content.extend_from_slice(b"PI1,Ren\xe9,Dupont,01/01/1980,01/01/2020\n");
        content.extend_from_slice(b"PI2,Good,Row,01/01/1980,01/01/2020\n");

        let employees = DelimitedEmployeeParser::default()
            .parse_at(&content, now())
            .unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].forenames, "Ren\u{fffd}");
        assert_eq!(employees[0].surname, "Dupont");
        assert_eq!(employees[1].payroll_number, "PI2");
    }

    #[test]
    fn test_short_row_keeps_defaults_and_neighbours() {
        let content = format!(
            "{}\nPI1,Ann,First,01/01/1980,01/01/2020\nPI2,Bob\nPI3,Cy,Third,01/01/1982,01/01/2022",
            HEADER
        );
        let employees = parse(&content).unwrap();
        let payrolls: Vec<&str> = employees.iter().map(|e| e.payroll_number.as_str()).collect();
        assert_eq!(payrolls, vec!["PI1", "PI2", "PI3"]);
        assert_eq!(employees[1].forenames, "Bob");
        assert_eq!(employees[1].surname, "");
        assert_eq!(employees[1].date_of_birth, None);
        assert_eq!(employees[1].start_date, None);
    }

    #[test]
    fn test_whitespace_only_lines_skipped() {
        let content = format!(
            "{}\n   \nPI1,Ann,First,01/01/1980,01/01/2020\n\
             \t\nPI2,Bob,Second,01/01/1981,01/01/2021",
            HEADER
        );
        let employees = parse(&content).unwrap();
        assert_eq!(employees.len(), 2);
    }
}
