//! Input and output file locations under the base directory.

use std::path::{Path, PathBuf};

pub const CUSTOMERS_FILE: &str = "clientes.xlsx";
pub const ORDERS_FILE: &str = "pedidos.csv";
pub const INVOICES_FILE: &str = "facturas.pdf";
pub const STUDENTS_FILE: &str = "estudiantes.csv";
pub const SESSIONS_FILE: &str = "sesiones.csv";
pub const GRADES_FILE: &str = "notas.csv";

pub const CUSTOMER_REPORT_FILE: &str = "reporte_clientes.csv";
pub const ACADEMIC_REPORT_FILE: &str = "reporte_academico.csv";

/// Resolves every source and output path against one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    base_dir: PathBuf,
}

impl SourceFiles {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn customers(&self) -> PathBuf {
        self.base_dir.join(CUSTOMERS_FILE)
    }

    pub fn orders(&self) -> PathBuf {
        self.base_dir.join(ORDERS_FILE)
    }

    pub fn invoices(&self) -> PathBuf {
        self.base_dir.join(INVOICES_FILE)
    }

    pub fn students(&self) -> PathBuf {
        self.base_dir.join(STUDENTS_FILE)
    }

    pub fn sessions(&self) -> PathBuf {
        self.base_dir.join(SESSIONS_FILE)
    }

    pub fn grades(&self) -> PathBuf {
        self.base_dir.join(GRADES_FILE)
    }

    pub fn customer_report(&self) -> PathBuf {
        self.base_dir.join(CUSTOMER_REPORT_FILE)
    }

    pub fn academic_report(&self) -> PathBuf {
        self.base_dir.join(ACADEMIC_REPORT_FILE)
    }

    /// The academic triple in load order: students, sessions, grades.
    pub fn academic_sources(&self) -> [PathBuf; 3] {
        [self.students(), self.sessions(), self.grades()]
    }
}
