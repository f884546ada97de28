// ==========================================
// 合并流程集成测试
// ==========================================
// 测试目标: 输入工作簿 → MergeApi → 输出报表，逐表核对
// ==========================================


use calamine::Data;
use std::fs;
use steel_merge::config::ConfigManager;
use steel_merge::logging;
use steel_merge::{ApiError, MergeApi, MergeConfig, MergeRequest};
use tempfile::TempDir;
use test_helpers::{f, num, read_workbook, s, sheet, text, write_workbook};

const HEADERS_A: &[&str] = &["规格", "数量", "表面处理", "是否带腹板"];
const HEADERS_B: &[&str] = &["规格", "表面处理", "数量", "备注"];
const HEADERS_BASIC: &[&str] = &["规格", "数量", "表面处理"];
const HEADERS_NO_TREATMENT: &[&str] = &["规格", "数量"];

/// 准备两个输入文件: A（刷漆为主） / B（镀锌）
fn prepare_inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let a = dir.path().join("清单A.xlsx");
    write_workbook(
        &a,
        &[(
            "一车间",
            HEADERS_A,
            vec![
                vec![text("FB-100-20-0-0"), num(2.0), text("Y"), text("否")],
                vec![text("FB-100-20-0-0"), num(3.0), text("Y")],
                vec![text("L50X5"), num(4.0), text("Y"), text("是")],
                vec![text("L40X4"), num(1.0), text("Y"), text("否")],
                vec![text("非标底座-1"), num(1.0), text("Y")],
            ],
        )],
    );

    let b = dir.path().join("清单B.xlsx");
    write_workbook(
        &b,
        &[(
            "Sheet1",
            HEADERS_B,
            vec![
                vec![text("GGФ108-6000"), text("G"), num(2.0)],
                vec![text("DZ-200"), text("G"), num(5.0), text("加急")],
                vec![text("DZ-200"), text("G"), num(1.0)],
            ],
        )],
    );

    (a, b)
}

#[test]
fn test_merge_full_report() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let (a, b) = prepare_inputs(&dir);
    let out_dir = dir.path().join("out");

    let api = MergeApi::new(MergeConfig::default());
    let summary = api
        .merge(&MergeRequest::new(vec![a, b], &out_dir, "汇总"))
        .unwrap();

    assert_eq!(summary.output_path, out_dir.join("汇总.xlsx"));
    assert_eq!(summary.source_count, 2);
    assert_eq!(summary.unified_rows, 8);

    let sheets = read_workbook(&summary.output_path);
    let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["总", "非标总", "刷漆Y总", "扁钢Y", "角钢Y", "镀锌G总", "钢管G", "底座G"]
    );

    // 总表: 列并集（按首次出现顺序），行按文件顺序
    let total = sheet(&sheets, "总");
    assert_eq!(
        total[0],
        vec![s("规格"), s("数量"), s("表面处理"), s("是否带腹板"), s("备注")]
    );
    assert_eq!(total.len(), 9);
    assert_eq!(total[1][0], s("FB-100-20-0-0"));
    assert_eq!(total[6][0], s("GGФ108-6000"));
    assert_eq!(total[7][4], s("加急"));

    // 非标总
    let non_standard = sheet(&sheets, "非标总");
    assert_eq!(non_standard.len(), 2);
    assert_eq!(non_standard[1][0], s("非标底座-1"));

    // 刷漆Y总: 带腹板的 L5 规格追加 P，非标行不进入
    let y_total = sheet(&sheets, "刷漆Y总");
    assert_eq!(y_total.len(), 5);
    let y_specs: Vec<&Data> = y_total[1..].iter().map(|r| &r[0]).collect();
    assert!(y_specs.contains(&&s("L50X5 P")));
    assert!(!y_specs.contains(&&s("非标底座-1")));

    // 扁钢Y: 规格 / 长度 / 数量
    assert_eq!(
        sheet(&sheets, "扁钢Y"),
        &[
            vec![s("规格"), s("长度"), s("数量")],
            vec![s("FB-100-20-0-0"), f(10.0), f(5.0)],
        ]
    );

    // 角钢Y: 带P 与普通规格并排
    assert_eq!(
        sheet(&sheets, "角钢Y"),
        &[
            vec![s("带P规格"), s("带P数量"), s("规格"), s("数量")],
            vec![s("L50X5 P"), f(4.0), s("L40X4"), f(1.0)],
        ]
    );

    // 钢管G: 规格拆分为直径与长度
    assert_eq!(
        sheet(&sheets, "钢管G"),
        &[
            vec![s("规格"), s("长度"), s("数量")],
            vec![s("Ф108"), s("6000"), f(2.0)],
        ]
    );

    // 底座G: 通用汇总
    assert_eq!(
        sheet(&sheets, "底座G"),
        &[vec![s("规格"), s("数量")], vec![s("DZ-200"), f(6.0)]]
    );
}

#[test]
fn test_merge_without_y_rows_skips_y_sheets() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("镀锌.xlsx");
    write_workbook(
        &input,
        &[(
            "Sheet1",
            HEADERS_BASIC,
            vec![
                vec![text("FB-100-20-0-0"), num(1.0), text("G")],
                vec![text("FB-100-20-0-0"), num(2.0), text("G")],
            ],
        )],
    );

    let summary = MergeApi::new(MergeConfig::default())
        .merge(&MergeRequest::new(vec![input], dir.path(), "结果"))
        .unwrap();

    let sheets = read_workbook(&summary.output_path);
    let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
    // 镀锌材料族表使用 G 后缀
    assert_eq!(names, vec!["总", "镀锌G总", "扁钢G"]);
    assert_eq!(sheet(&sheets, "扁钢G")[1], vec![s("FB-100-20-0-0"), f(10.0), f(3.0)]);
}

#[test]
fn test_merge_mixed_csv_and_excel() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("补充.csv");
    fs::write(&csv_path, "规格,数量,表面处理\nDZ-300,2,Y\nDZ-300,abc,Y\n").unwrap();
    let xlsx_path = dir.path().join("主单.xlsx");
    write_workbook(
        &xlsx_path,
        &[(
            "Sheet1",
            HEADERS_BASIC,
            vec![vec![text("DZ-300"), num(3.0), text("Y")]],
        )],
    );

    let summary = MergeApi::new(MergeConfig::default())
        .merge(&MergeRequest::new(vec![xlsx_path, csv_path], dir.path(), "混合"))
        .unwrap();

    let sheets = read_workbook(&summary.output_path);
    // 无法解析的数量按缺失处理
    let total = sheet(&sheets, "总");
    assert_eq!(total[3][1], Data::Empty);
    assert_eq!(sheet(&sheets, "底座Y")[1], vec![s("DZ-300"), f(5.0)]);
}

#[test]
fn test_merge_missing_treatment_column_writes_nothing() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("缺列.xlsx");
    write_workbook(
        &input,
        &[("Sheet1", HEADERS_NO_TREATMENT, vec![vec![text("FB-1"), num(1.0)]])],
    );

    let err = MergeApi::new(MergeConfig::default())
        .merge(&MergeRequest::new(vec![input], dir.path(), "结果"))
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingColumn(ref c) if c == "表面处理"));
    assert!(!dir.path().join("结果.xlsx").exists());
}

#[test]
fn test_merge_unreadable_source_is_load_error() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("损坏.xlsx");
    fs::write(&broken, b"not a workbook").unwrap();

    let err = MergeApi::new(MergeConfig::default())
        .merge(&MergeRequest::new(vec![broken], dir.path(), "结果"))
        .unwrap_err();

    match err {
        ApiError::LoadError { path, .. } => assert!(path.ends_with("损坏.xlsx")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("结果.xlsx").exists());
}

#[test]
fn test_merge_rejects_incomplete_request() {
    let api = MergeApi::new(MergeConfig::default());

    let request = MergeRequest {
        sources: vec!["a.xlsx".into()],
        output_dir: Some("/tmp".into()),
        output_name: None,
    };

    assert!(matches!(api.merge(&request), Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_merge_with_custom_config_file() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{
            "treatments": [ { "code": "Y", "total_sheet": "油漆总", "sheet_suffix": "-漆" } ],
            "families": [ { "name": "圆钢", "prefixes": ["YG"] } ]
        }"#,
    )
    .unwrap();
    let input = dir.path().join("清单.xlsx");
    write_workbook(
        &input,
        &[(
            "Sheet1",
            HEADERS_BASIC,
            vec![
                vec![text("YG20"), num(1.0), text("Y")],
                vec![text("YG16"), num(2.0), text("Y")],
                vec![text("YG20"), num(4.0), text("Y")],
            ],
        )],
    );

    let config = ConfigManager::resolve(Some(&config_path))
        .unwrap()
        .into_config();
    let summary = MergeApi::new(config)
        .merge(&MergeRequest::new(vec![input], dir.path(), "结果"))
        .unwrap();

    let sheets = read_workbook(&summary.output_path);
    let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["总", "油漆总", "圆钢-漆"]);
    assert_eq!(
        sheet(&sheets, "圆钢-漆"),
        &[
            vec![s("规格"), s("数量")],
            vec![s("YG16"), f(2.0)],
            vec![s("YG20"), f(5.0)],
        ]
    );
}
