//! Subcommand implementations.

use std::{collections::BTreeMap, fmt::Write as _, fs, path::Path};

use template::{Config, Token};
use tracing::debug;

use crate::error::{Error, Result};

/// Read the template at `path`.
fn load(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and compile the template at `path`.
fn compile(path: &Path) -> Result<Config> {
    let source = load(path)?;
    let cfg =
        template::compile(&source).map_err(|e| Error::template(path.to_path_buf(), &e, &source))?;
    debug!(target: "tagtmpl", path = %path.display(), questions = cfg.questions.len(), "compiled");
    Ok(cfg)
}

/// `check`: compile and print a summary.
pub fn check(path: &Path) -> Result<()> {
    let cfg = compile(path)?;
    print!("{}", summary(&cfg));
    Ok(())
}

/// `tokens`: print one line per token.
pub fn tokens(path: &Path) -> Result<()> {
    let source = load(path)?;
    let tokens =
        template::tokenize(&source).map_err(|e| Error::template(path.to_path_buf(), &e, &source))?;
    for token in &tokens {
        println!("{}", token_line(token));
    }
    Ok(())
}

/// `dump`: compile and print the configuration as pretty JSON.
pub fn dump(path: &Path) -> Result<()> {
    let cfg = compile(path)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

/// Format a token as `line:col KEY "value"`.
fn token_line(token: &Token) -> String {
    format!("{} {} {:?}", token.pos(), token.key, token.value)
}

/// Human-readable overview of a compiled template.
fn summary(cfg: &Config) -> String {
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for q in &cfg.questions {
        *kinds.entry(q.kind_name()).or_default() += 1;
    }

    let mut out = String::new();
    let _ignored = writeln!(out, "questions: {}", cfg.questions.len());
    for (kind, count) in &kinds {
        let _ignored = writeln!(out, "  {kind}: {count}");
    }
    let _ignored = writeln!(out, "alias triggers: {}", cfg.conditional_tags.len());
    let _ignored = writeln!(out, "nameless tags: {}", cfg.nameless_tags.names().join(" "));
    let _ignored = writeln!(out, "sourceless tags: {}", cfg.sourceless_tags.names().join(" "));
    let _ignored = writeln!(out, "tagless tags: {}", cfg.tagless_tags.names().join(" "));
    let _ignored = writeln!(out, "default source: {:?}", cfg.default_source);
    let _ignored = writeln!(out, "default safety: {}", cfg.default_safety);
    let _ignored = writeln!(out, "max open files: {}", cfg.max_open_files);
    let _ignored = writeln!(out, "update interval: {:?}", cfg.update_interval);
    let _ignored = writeln!(out, "max image buffer: {} bytes", cfg.max_image_buffer_size);
    let _ignored = writeln!(
        out,
        "background: {} / {} ({} px squares)",
        cfg.background_color_one, cfg.background_color_two, cfg.background_square_width
    );
    let _ignored = writeln!(out, "image quality: {:?}", cfg.default_image_quality);
    let _ignored = writeln!(out, "keybinds: {}", cfg.keybinds.len());
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn summary_counts_questions_by_kind() {
        let cfg = template::compile(
            r#"ENTRY_QUESTION: "a" ENTRY_QUESTION: "b"
            CHECK_QUESTION: "c" OPTION_NAME: "x" OPTION_TAG: "x"
            ALIAS_TAG_FROM: "p q" ALIAS_TAG_TO: "r"
            TAGLESS_TAG: "tagme""#,
        )
        .unwrap();
        let text = summary(&cfg);
        assert!(text.starts_with("questions: 3\n"));
        assert!(text.contains("  check: 1\n"));
        assert!(text.contains("  entry: 2\n"));
        assert!(text.contains("alias triggers: 2\n"));
        assert!(text.contains("tagless tags: tagme\n"));
        assert!(text.contains("#999999 / #666666 (16 px squares)"));
    }

    #[test]
    fn token_lines_quote_values() {
        let tokens = template::tokenize("\n  KEYBIND: \"say \\\"hi\\\"\"").unwrap();
        assert_eq!(token_line(&tokens[0]), r#"2:3 KEYBIND "say \"hi\"""#);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load(Path::new("/nonexistent/tagtmpl/test.tmpl")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/tagtmpl/test.tmpl"));
    }

    #[test]
    fn template_errors_carry_excerpt() {
        let source = "ENTRY_QUESTION: \"ok\"\nOPTION_NAME: \"stray\"";
        let err = template::compile(source).unwrap_err();
        let wrapped = Error::template(PathBuf::from("t.tmpl"), &err, source);
        let text = wrapped.to_string();
        assert!(text.starts_with("t.tmpl: "));
        assert!(text.contains("line 2"));
        assert!(text.contains("OPTION_NAME"));
    }
}
