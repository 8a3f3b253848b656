//! Bilingual catalog of user-facing diagnostics.
//!
//! Every message that reaches a user (log lines and error reports alike) is
//! looked up here by [`MessageKey`] and rendered for the selected [`Lang`].
//! Templates use `{name}` placeholders that [`render`] fills in.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

// ── Lang ──────────────────────────────────────────────────────────────────────

/// Language used for rendering diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
}

impl Lang {
    /// Resolve a language from a tag or a POSIX locale string.
    ///
    /// Only the part before the first `_`, `-` or `.` is considered, so
    /// `"es_ES.UTF-8"`, `"es-MX"` and `"ES"` all resolve to [`Lang::Es`].
    /// Anything unrecognised falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        let prefix = locale
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match prefix.as_str() {
            "es" => Lang::Es,
            _ => Lang::En,
        }
    }

    /// Short language tag, e.g. `"en"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `clap` value parser for `--lang`; never fails.
pub fn parse_lang(value: &str) -> Result<Lang, Infallible> {
    Ok(Lang::from_locale(value))
}

// ── MessageKey ────────────────────────────────────────────────────────────────

/// Identifies one entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NotCsvSuffix,
    FileNotFound,
    NoReadPermission,
    CannotRead,
    NotProcessed,
    MalformedRow,
    InvalidCount,
    CountOverflow,
    EmptyCounts,
    ConfigInvalid,
    ConfigNotFound,
    Internal,
    ProcessingFiles,
    ReadingFile,
    ComputingCounts,
    CollateSummary,
    NoFilesProcessed,
}

/// Raw template for `key` in `lang`.
pub fn template(lang: Lang, key: MessageKey) -> &'static str {
    use MessageKey::*;
    match (lang, key) {
        (Lang::En, NotCsvSuffix) => "{fname}: File must end in .csv",
        (Lang::Es, NotCsvSuffix) => "{fname}: El archivo debe terminar en .csv",

        (Lang::En, FileNotFound) => "{fname}: File does not exist",
        (Lang::Es, FileNotFound) => "{fname}: El archivo no existe",

        (Lang::En, NoReadPermission) => "{fname}: No read permission",
        (Lang::Es, NoReadPermission) => "{fname}: Sin permiso de lectura",

        (Lang::En, CannotRead) => "{fname}: Cannot read file: {reason}",
        (Lang::Es, CannotRead) => "{fname}: No se puede leer el archivo: {reason}",

        (Lang::En, NotProcessed) => "{fname} not processed: {reason}",
        (Lang::Es, NotProcessed) => "{fname} no procesado: {reason}",

        (Lang::En, MalformedRow) => "{fname}: line {line}: expected 2 fields, found {found}",
        (Lang::Es, MalformedRow) => {
            "{fname}: línea {line}: se esperaban 2 campos, se encontraron {found}"
        }

        (Lang::En, InvalidCount) => {
            "{fname}: line {line}: count '{value}' is not a non-negative integer"
        }
        (Lang::Es, InvalidCount) => {
            "{fname}: línea {line}: el conteo '{value}' no es un entero no negativo"
        }

        (Lang::En, CountOverflow) => "count for '{word}' is too large",
        (Lang::Es, CountOverflow) => "el conteo de '{word}' es demasiado grande",

        (Lang::En, EmptyCounts) => "{fname}: no word counts to fit",
        (Lang::Es, EmptyCounts) => "{fname}: no hay conteos de palabras para ajustar",

        (Lang::En, ConfigInvalid) => "{fname}: invalid configuration: {reason}",
        (Lang::Es, ConfigInvalid) => "{fname}: configuración no válida: {reason}",

        (Lang::En, ConfigNotFound) => "{fname}: configuration file does not exist",
        (Lang::Es, ConfigNotFound) => "{fname}: el archivo de configuración no existe",

        (Lang::En, Internal) => "internal error (please report this bug): {reason}",
        (Lang::Es, Internal) => "error interno (por favor informe este fallo): {reason}",

        (Lang::En, ProcessingFiles) => "Processing files...",
        (Lang::Es, ProcessingFiles) => "Procesando archivos...",

        (Lang::En, ReadingFile) => "Reading in {fname}...",
        (Lang::Es, ReadingFile) => "Leyendo {fname}...",

        (Lang::En, ComputingCounts) => "Computing word counts...",
        (Lang::Es, ComputingCounts) => "Calculando conteos de palabras...",

        (Lang::En, CollateSummary) => "{processed} of {total} files processed, {words} distinct words",
        (Lang::Es, CollateSummary) => {
            "{processed} de {total} archivos procesados, {words} palabras distintas"
        }

        (Lang::En, NoFilesProcessed) => "no input files were processed",
        (Lang::Es, NoFilesProcessed) => "no se procesó ningún archivo de entrada",
    }
}

/// Render `key` in `lang`, substituting each `{name}` with its value.
///
/// Placeholders without a matching argument are left untouched.
pub fn render(lang: Lang, key: MessageKey, args: &[(&str, String)]) -> String {
    let mut out = template(lang, key).to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locale_variants() {
        assert_eq!(Lang::from_locale("es_ES.UTF-8"), Lang::Es);
        assert_eq!(Lang::from_locale("es-MX"), Lang::Es);
        assert_eq!(Lang::from_locale("ES"), Lang::Es);
        assert_eq!(Lang::from_locale("en_GB.UTF-8"), Lang::En);
        assert_eq!(Lang::from_locale("C.UTF-8"), Lang::En);
        assert_eq!(Lang::from_locale(""), Lang::En);
        assert_eq!(Lang::from_locale("fr_FR"), Lang::En);
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let msg = render(Lang::En, MessageKey::NotCsvSuffix, &[("fname", "data.txt".to_string())]);
        assert_eq!(msg, "data.txt: File must end in .csv");

        let msg = render(Lang::Es, MessageKey::NotCsvSuffix, &[("fname", "data.txt".to_string())]);
        assert_eq!(msg, "data.txt: El archivo debe terminar en .csv");
    }

    #[test]
    fn test_render_multiple_and_numeric_args() {
        let msg = render(
            Lang::En,
            MessageKey::CollateSummary,
            &[
                ("processed", 2.to_string()),
                ("total", 3.to_string()),
                ("words", 17.to_string()),
            ],
        );
        assert_eq!(msg, "2 of 3 files processed, 17 distinct words");
    }

    #[test]
    fn test_render_leaves_missing_placeholder() {
        let msg = render(Lang::En, MessageKey::NotProcessed, &[("fname", "a.csv".to_string())]);
        assert_eq!(msg, "a.csv not processed: {reason}");
    }

    #[test]
    fn test_lang_serde_lowercase() {
        let lang: Lang = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(lang, Lang::Es);
        assert_eq!(serde_json::to_string(&Lang::En).unwrap(), "\"en\"");
    }
}
