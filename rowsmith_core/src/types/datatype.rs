/// Semantic family a declared column type coerces into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Integer,
    /// 16-bit signed, held as `TypedValue::Int`.
    SmallInteger,
    /// 8-bit unsigned, held as `TypedValue::Int`.
    TinyInteger,
    BigInteger,
    Decimal,
    Float,
    Boolean,
    DateTime,
    Text,
    Binary,
    /// Engine-specific or unrecognized type name.
    Other,
}

impl TypeFamily {
    /// Inclusive range of the integer families stored as `TypedValue::Int`.
    pub fn int_bounds(self) -> Option<(i64, i64)> {
        match self {
            TypeFamily::Integer => Some((i32::MIN.into(), i32::MAX.into())),
            TypeFamily::SmallInteger => Some((i16::MIN.into(), i16::MAX.into())),
            TypeFamily::TinyInteger => Some((u8::MIN.into(), u8::MAX.into())),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFamily::Integer => "int",
            TypeFamily::SmallInteger => "smallint",
            TypeFamily::TinyInteger => "tinyint",
            TypeFamily::BigInteger => "bigint",
            TypeFamily::Decimal => "decimal",
            TypeFamily::Float => "float",
            TypeFamily::Boolean => "bool",
            TypeFamily::DateTime => "datetime",
            TypeFamily::Text => "text",
            TypeFamily::Binary => "binary",
            TypeFamily::Other => "other",
        }
    }
}

/// Normalized type name -> family. The single source of truth for dispatch.
const TYPE_FAMILIES: &[(&str, TypeFamily)] = &[
    ("int", TypeFamily::Integer),
    ("integer", TypeFamily::Integer),
    ("smallint", TypeFamily::SmallInteger),
    ("tinyint", TypeFamily::TinyInteger),
    ("bigint", TypeFamily::BigInteger),
    ("decimal", TypeFamily::Decimal),
    ("numeric", TypeFamily::Decimal),
    ("money", TypeFamily::Decimal),
    ("smallmoney", TypeFamily::Decimal),
    ("float", TypeFamily::Float),
    ("real", TypeFamily::Float),
    ("double", TypeFamily::Float),
    ("double precision", TypeFamily::Float),
    ("bit", TypeFamily::Boolean),
    ("bool", TypeFamily::Boolean),
    ("boolean", TypeFamily::Boolean),
    ("date", TypeFamily::DateTime),
    ("datetime", TypeFamily::DateTime),
    ("datetime2", TypeFamily::DateTime),
    ("smalldatetime", TypeFamily::DateTime),
    ("char", TypeFamily::Text),
    ("nchar", TypeFamily::Text),
    ("varchar", TypeFamily::Text),
    ("nvarchar", TypeFamily::Text),
    ("text", TypeFamily::Text),
    ("ntext", TypeFamily::Text),
    ("binary", TypeFamily::Binary),
    ("varbinary", TypeFamily::Binary),
    ("image", TypeFamily::Binary),
];

/// Engine type names offered when defining a column.
pub const ENGINE_TYPES: &[&str] = &[
    "bigint",
    "binary",
    "bit",
    "char",
    "date",
    "datetime",
    "datetime2",
    "datetimeoffset",
    "decimal",
    "float",
    "image",
    "int",
    "money",
    "nchar",
    "ntext",
    "numeric",
    "nvarchar",
    "real",
    "smalldatetime",
    "smallint",
    "smallmoney",
    "sql_variant",
    "text",
    "time",
    "timestamp",
    "tinyint",
    "uniqueidentifier",
    "varbinary",
    "varchar",
    "xml",
];

/// Lower-cases a declared type and strips any length/precision arguments,
/// so `NVARCHAR(50)` and `decimal (10, 2)` normalize to `nvarchar` and `decimal`.
pub fn base_type_name(declared: &str) -> String {
    let base = match declared.find('(') {
        Some(idx) => &declared[..idx],
        None => declared,
    };
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn type_family(declared: &str) -> TypeFamily {
    let base = base_type_name(declared);
    TYPE_FAMILIES
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, family)| *family)
        .unwrap_or(TypeFamily::Other)
}

/// Only the plain integer type may carry an identity (auto-increment) column.
pub fn is_identity_capable(declared: &str) -> bool {
    base_type_name(declared) == "int"
}

/// Words that would turn a type into a column constraint in DDL text.
const CONSTRAINT_WORDS: &[&str] = &[
    "primary",
    "key",
    "identity",
    "not",
    "null",
    "default",
    "constraint",
    "unique",
    "check",
    "references",
    "collate",
];

/// Whether `declared` can be written into DDL text as a bare data type.
///
/// Accepts `base[(arg[,arg])]`: one or two identifier words that are not
/// constraint keywords, then at most two arguments, each digits or `max`.
pub fn is_valid_type_text(declared: &str) -> bool {
    let trimmed = declared.trim();
    let (base, args) = match trimmed.find('(') {
        Some(open) => match trimmed[open + 1..].strip_suffix(')') {
            Some(args) => (&trimmed[..open], Some(args)),
            None => return false,
        },
        None => (trimmed, None),
    };

    let words: Vec<&str> = base.split_whitespace().collect();
    if words.is_empty() || words.len() > 2 || !words.iter().all(|w| is_type_word(w)) {
        return false;
    }

    match args {
        None => true,
        Some(args) => {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            parts.len() <= 2 && parts.iter().all(|p| is_type_argument(p))
        }
    }
}

fn is_type_word(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !CONSTRAINT_WORDS.iter().any(|kw| word.eq_ignore_ascii_case(kw))
}

fn is_type_argument(arg: &str) -> bool {
    arg.eq_ignore_ascii_case("max") || (!arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()))
}
