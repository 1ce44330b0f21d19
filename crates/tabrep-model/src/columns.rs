//! Canonical column names for source tables and derived reports.
//!
//! Source files are expected to carry these headers. Derived columns are
//! produced by the report pipelines and never read back as input.

/// Customer source (`clientes.xlsx`).
pub mod customer {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";

    /// Columns of the substitute table used when the source is absent.
    pub const EXPECTED: [&str; 3] = [CUSTOMER_ID, NAME, EMAIL];
}

/// Order source (`pedidos.csv`).
pub mod order {
    pub const ORDER_ID: &str = "order_id";
    pub const CUSTOMER_ID: &str = super::customer::CUSTOMER_ID;
    pub const VALUE: &str = "value";

    pub const EXPECTED: [&str; 3] = [ORDER_ID, CUSTOMER_ID, VALUE];
}

/// Derived customer report columns.
pub mod customer_report {
    pub const ORDER_COUNT: &str = "order_count";
    pub const TOTAL_VALUE: &str = "total_value";
    pub const CATEGORY: &str = "category";

    pub const VIP: &str = "VIP";
    pub const REGULAR: &str = "Regular";

    /// Columns shown in the console preview, in order.
    pub const PREVIEW: [&str; 4] = [super::customer::NAME, ORDER_COUNT, TOTAL_VALUE, CATEGORY];
}

/// Student source (`estudiantes.csv`).
pub mod student {
    pub const STUDENT_ID: &str = "student_id";
    pub const GRADE_LEVEL: &str = "grade_level";
    pub const SEX: &str = "sex";
    pub const STRATUM: &str = "stratum";
    pub const AVERAGE: &str = "average";
    pub const ABSENCES: &str = "absences";
    pub const CLUB: &str = "club";
    pub const ENROLLMENT_DATE: &str = "enrollment_date";
    pub const STATUS: &str = "status";
}

/// Session source (`sesiones.csv`).
pub mod session {
    pub const SESSION_ID: &str = "session_id";
    pub const STUDENT_ID: &str = super::student::STUDENT_ID;
    pub const DATE: &str = "date";
    pub const TOPIC: &str = "topic";
    pub const DURATION_MINUTES: &str = "duration_minutes";
    pub const MODALITY: &str = "modality";
    pub const ATTENDED: &str = "attended";
    /// Optional; taken from the student table when the session file lacks it.
    pub const GRADE_LEVEL: &str = super::student::GRADE_LEVEL;
}

/// Grade source (`notas.csv`).
pub mod grade {
    pub const STUDENT_ID: &str = super::student::STUDENT_ID;
    pub const SUBJECT_AREA: &str = "subject_area";
    pub const PERIOD: &str = "period";
    pub const SCORE: &str = "score";
}

/// Derived academic report columns.
pub mod academic_report {
    use super::student::{GRADE_LEVEL, STUDENT_ID};

    pub const SESSIONS_ATTENDED: &str = "sessions_attended";
    pub const TOTAL_MINUTES: &str = "total_minutes";
    pub const GLOBAL_AVERAGE: &str = "global_average";
    pub const RISK: &str = "risk";
    pub const PERIOD: &str = "period";
    pub const COHORT_GRADE_LEVEL: &str = "cohort_grade_level";
    pub const SESSIONS_TOTAL_GROUP: &str = "sessions_total_group";
    pub const PARTICIPATION_INDEX: &str = "participation_index";

    /// Leading columns of the persisted report; everything else follows.
    pub const LEADING: [&str; 8] = [
        STUDENT_ID,
        GRADE_LEVEL,
        PERIOD,
        SESSIONS_ATTENDED,
        TOTAL_MINUTES,
        GLOBAL_AVERAGE,
        RISK,
        PARTICIPATION_INDEX,
    ];
}
