use std::env::temp_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::array::Int64Array;
use arrow::array::StringArray;
use arrow::datatypes::DataType;
use arrow::datatypes::Field;
use arrow::datatypes::Schema;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use catalog::error::Result;
use catalog::local::Options;
use catalog::manifest::SchemaManifest;
use catalog::Catalog;
use catalog::CatalogError;
use catalog::ColumnMask;
use catalog::LocalCatalog;
use catalog::Namespace;
use catalog::Statement;
use common::config::OutputFormat;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use uuid::Uuid;

fn root() -> PathBuf {
    let mut path = temp_dir();
    path.push(format!("catalog-{}", Uuid::new_v4()));
    path
}

fn users() -> (SchemaRef, RecordBatch) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Int64, false),
        Field::new("email", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(schema.clone(), vec![
        Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
        Arc::new(StringArray::from(vec![
            "abcde.fghij@example.com",
            "klmno.pqrst@example.com",
            "uvwxy.zabcd@example.com",
        ])) as ArrayRef,
    ])
    .unwrap();

    (schema, batch)
}

fn catalog(root: &PathBuf, format: OutputFormat) -> LocalCatalog {
    LocalCatalog::new(root, Options {
        format,
        create_catalog: true,
    })
}

#[test]
fn test_write_parquet() -> Result<()> {
    let root = root();
    let cat = catalog(&root, OutputFormat::Parquet);
    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;

    let (schema, batch) = users();
    let info = cat.write_table(&ns, "users", schema.clone(), &[batch.clone(), batch])?;
    assert_eq!(info.rows, 6);
    assert!(info.bytes > 0);

    let path = cat.table_path(&ns, "users");
    assert_eq!(path, root.join("main").join("bricksmart").join("users.parquet"));
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
    let mut rows = 0;
    for batch in reader {
        let batch = batch?;
        assert_eq!(batch.schema().fields(), schema.fields());
        rows += batch.num_rows();
    }
    assert_eq!(rows, 6);

    let md = cat.manifest(&ns)?;
    assert_eq!(md.table("users")?.rows, 6);

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_write_csv() -> Result<()> {
    let root = root();
    let cat = catalog(&root, OutputFormat::Csv);
    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;

    let (schema, batch) = users();
    cat.write_table(&ns, "users", schema, &[batch])?;

    let data = fs::read_to_string(cat.table_path(&ns, "users"))?;
    let lines = data.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "user_id,email");
    assert_eq!(lines[1], "1,abcde.fghij@example.com");
    assert_eq!(lines.len(), 4);

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_execute_and_log() -> Result<()> {
    let root = root();
    let cat = catalog(&root, OutputFormat::Parquet);
    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;
    let (schema, batch) = users();
    cat.write_table(&ns, "users", schema, &[batch])?;

    let mask = ColumnMask::new("mask_email", "email", "admins", "***@example.com");
    cat.execute(&ns, &Statement::table_comment("users", "registered users"))?;
    cat.execute(&ns, &Statement::primary_key("users", "users_pk", "user_id"))?;
    cat.execute(&ns, &Statement::CreateFunction(mask))?;
    cat.execute(&ns, &Statement::mask("users", "email", "mask_email"))?;

    assert!(matches!(
        cat.execute(&ns, &Statement::table_comment("feedbacks", "x")),
        Err(CatalogError::TableNotFound(_))
    ));

    let log = fs::read_to_string(cat.ddl_path(&ns))?;
    let lines = log.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "COMMENT ON TABLE users IS 'registered users';");
    assert_eq!(
        lines[3],
        "ALTER TABLE users ALTER COLUMN email SET MASK mask_email;"
    );

    // the manifest survives a new catalog instance
    let md = catalog(&root, OutputFormat::Parquet).manifest(&ns)?;
    let users = md.table("users")?;
    assert_eq!(users.comment.as_deref(), Some("registered users"));
    assert_eq!(users.primary_key.as_ref().unwrap().name, "users_pk");
    assert!(md.functions.contains_key("mask_email"));

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_replace_schema() -> Result<()> {
    let root = root();
    let cat = catalog(&root, OutputFormat::Parquet);
    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;
    let (schema, batch) = users();
    cat.write_table(&ns, "users", schema, &[batch])?;

    cat.create_schema(&ns, false)?;
    assert!(cat.table_path(&ns, "users").exists());

    cat.create_schema(&ns, true)?;
    assert!(!cat.table_path(&ns, "users").exists());
    assert!(cat.manifest(&ns)?.tables.is_empty());

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_missing_catalog() -> Result<()> {
    let root = root();
    let cat = LocalCatalog::new(&root, Options {
        format: OutputFormat::Parquet,
        create_catalog: false,
    });
    let ns = Namespace::new("main", "bricksmart");
    assert!(matches!(
        cat.create_schema(&ns, true),
        Err(CatalogError::CatalogNotFound(_))
    ));

    let (schema, batch) = users();
    assert!(matches!(
        cat.write_table(&ns, "users", schema, &[batch]),
        Err(CatalogError::SchemaNotFound(_))
    ));

    fs::create_dir_all(root.join("main"))?;
    cat.create_schema(&ns, true)?;

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_names_stay_under_root() -> Result<()> {
    let root = root();
    let outside = temp_dir().join(format!("outside-{}", Uuid::new_v4()));
    fs::create_dir_all(&outside)?;
    fs::write(outside.join("keep.txt"), "keep")?;

    let cat = catalog(&root, OutputFormat::Parquet);
    let outside_str = outside.to_string_lossy().to_string();
    for ns in [
        Namespace::new(&outside_str, "bricksmart"),
        Namespace::new("main", &outside_str),
        Namespace::new("main", "../../x"),
        Namespace::new("..", "bricksmart"),
        Namespace::new("main", "a/b"),
    ] {
        assert!(
            matches!(
                cat.create_schema(&ns, true),
                Err(CatalogError::InvalidName(_))
            ),
            "{ns}"
        );
        assert!(matches!(
            cat.manifest(&ns),
            Err(CatalogError::InvalidName(_))
        ));
    }
    assert!(outside.join("keep.txt").exists());

    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;
    let (schema, batch) = users();
    assert!(matches!(
        cat.write_table(&ns, "../users", schema, &[batch]),
        Err(CatalogError::InvalidName(_))
    ));

    fs::remove_dir_all(outside)?;
    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_files_complete_on_return() -> Result<()> {
    let root = root();
    let cat = catalog(&root, OutputFormat::Csv);
    let ns = Namespace::new("main", "bricksmart");
    cat.create_schema(&ns, true)?;

    let (schema, batch) = users();
    cat.write_table(&ns, "users", schema, &[batch])?;

    // the last buffered bytes must be on disk once write_table returns
    let data = fs::read_to_string(cat.table_path(&ns, "users"))?;
    assert_eq!(
        data,
        "user_id,email\n\
         1,abcde.fghij@example.com\n\
         2,klmno.pqrst@example.com\n\
         3,uvwxy.zabcd@example.com\n"
    );

    let md: SchemaManifest =
        serde_json::from_str(&fs::read_to_string(root.join("main/bricksmart/_catalog.json"))?)?;
    let users = md.table("users")?;
    assert_eq!(users.rows, 3);
    assert_eq!(
        users.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["user_id", "email"]
    );

    fs::remove_dir_all(root)?;
    Ok(())
}
