use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use common::config::OutputFormat;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use crate::error::CatalogError;
use crate::error::Result;
use crate::manifest::SchemaManifest;
use crate::Catalog;
use crate::Namespace;
use crate::Statement;
use crate::TableInfo;

const MANIFEST_FILE: &str = "_catalog.json";
const DDL_FILE: &str = "_ddl.sql";

pub struct Options {
    pub format: OutputFormat,
    /// Create the catalog directory when it doesn't exist instead of failing.
    pub create_catalog: bool,
}

/// Catalog on the local filesystem: `<root>/<catalog>/<schema>/<table>.<format>` plus the
/// schema manifest and a log of every executed statement.
pub struct LocalCatalog {
    root: PathBuf,
    opts: Options,
    // serializes manifest read-modify-write
    lock: Mutex<()>,
}

impl LocalCatalog {
    pub fn new<P: AsRef<Path>>(root: P, opts: Options) -> Self {
        LocalCatalog {
            root: root.as_ref().to_path_buf(),
            opts,
            lock: Mutex::new(()),
        }
    }

    pub fn schema_path(&self, ns: &Namespace) -> PathBuf {
        self.root.join(&ns.catalog).join(&ns.schema)
    }

    /// Schema directory for `ns`, refusing names that would resolve outside of the root.
    fn checked_schema_path(&self, ns: &Namespace) -> Result<PathBuf> {
        check_name(&ns.catalog)?;
        check_name(&ns.schema)?;
        let path = self.schema_path(ns);
        if !path.starts_with(&self.root) {
            return Err(CatalogError::InvalidName(ns.to_string()));
        }

        Ok(path)
    }

    pub fn table_path(&self, ns: &Namespace, name: &str) -> PathBuf {
        self.schema_path(ns)
            .join(format!("{name}.{}", self.opts.format.extension()))
    }

    pub fn ddl_path(&self, ns: &Namespace) -> PathBuf {
        self.schema_path(ns).join(DDL_FILE)
    }

    pub fn manifest(&self, ns: &Namespace) -> Result<SchemaManifest> {
        let path = self.checked_schema_path(ns)?;
        if !path.try_exists()? {
            return Err(CatalogError::SchemaNotFound(ns.to_string()));
        }
        let path = path.join(MANIFEST_FILE);
        if !path.try_exists()? {
            return Ok(SchemaManifest::default());
        }

        Ok(serde_json::from_reader(File::open(path)?)?)
    }

    fn save_manifest(&self, ns: &Namespace, md: &SchemaManifest) -> Result<()> {
        let path = self.schema_path(ns).join(MANIFEST_FILE);
        let tmp = path.with_extension("json.tmp");
        let mut w = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut w, md)?;
        w.flush()?;
        fs::rename(tmp, path)?;

        Ok(())
    }

    fn write_parquet(
        &self,
        path: &Path,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> Result<()> {
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(File::create(path)?, schema, Some(props))?;
        for batch in batches {
            writer.write(batch)?;
        }
        // writer must be closed to write footer
        writer.close()?;

        Ok(())
    }

    fn write_csv(&self, path: &Path, batches: &[RecordBatch]) -> Result<()> {
        let mut writer = arrow::csv::WriterBuilder::new()
            .with_header(true)
            .build(BufWriter::new(File::create(path)?));
        for batch in batches {
            writer.write(batch)?;
        }
        writer.into_inner().flush()?;

        Ok(())
    }
}

/// A catalog, schema or table name must be a single plain path segment.
fn check_name(name: &str) -> Result<()> {
    let mut parts = Path::new(name).components();
    match (parts.next(), parts.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(CatalogError::InvalidName(name.to_string())),
    }
}

impl Catalog for LocalCatalog {
    fn create_schema(&self, ns: &Namespace, replace: bool) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.checked_schema_path(ns)?;
        let catalog_path = self.root.join(&ns.catalog);
        if !catalog_path.try_exists()? {
            if !self.opts.create_catalog {
                return Err(CatalogError::CatalogNotFound(ns.catalog.clone()));
            }
            debug!("creating catalog directory {:?}", catalog_path);
            fs::create_dir_all(&catalog_path)?;
        }

        if replace && path.try_exists()? {
            debug!("dropping schema {ns} at {:?}", path);
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;

        Ok(())
    }

    fn write_table(
        &self,
        ns: &Namespace,
        name: &str,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> Result<TableInfo> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        check_name(name)?;
        let mut md = self.manifest(ns)?;

        let path = self.table_path(ns, name);
        let tmp = path.with_extension("tmp");
        match self.opts.format {
            OutputFormat::Parquet => self.write_parquet(&tmp, schema.clone(), batches)?,
            OutputFormat::Csv => self.write_csv(&tmp, batches)?,
        }
        fs::rename(&tmp, &path)?;

        let rows = batches.iter().map(|b| b.num_rows()).sum();
        let bytes = fs::metadata(&path)?.len();
        md.register_table(name, schema.as_ref(), rows);
        self.save_manifest(ns, &md)?;
        debug!("table {ns}.{name} written to {:?}", path);

        Ok(TableInfo {
            name: name.to_string(),
            rows,
            bytes,
        })
    }

    fn execute(&self, ns: &Namespace, stmt: &Statement) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut md = self.manifest(ns)?;
        md.apply(stmt)?;
        self.save_manifest(ns, &md)?;

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.ddl_path(ns))?;
        writeln!(log, "{stmt};")?;

        Ok(())
    }
}
