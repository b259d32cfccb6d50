// CLI command implementations
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use glob::{glob, Pattern};
use serde_json::{json, Value};

use wavify::convert::WAV_EXTENSION;
use wavify::{convert_file, derive_output_path, extract_file, inspect_file, AudioParams, WavHeader};

use crate::cli::output::{OutputFormatter, ProgressBar};
use crate::cli::{CliError, CliResult};

/// Convert files to WAV
pub fn command_convert(
    files: &[PathBuf],
    output: Option<&Path>,
    params: &AudioParams,
    force: bool,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::InvalidArgs("No files specified".to_string()));
    }
    if output.is_some() && files.len() > 1 {
        return Err(CliError::InvalidArgs(
            "--output can only be used with a single input file".to_string(),
        ));
    }

    params.validate()?;
    formatter.print_debug(&format!("Parameters: {}", describe_params(params)));

    let mut failed = 0;
    for input in files {
        let target = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| derive_output_path(input));

        match convert_one(input, &target, params, force) {
            Ok(header) => formatter.print_success(&format!(
                "{} -> {} ({} bytes of payload)",
                input.display(),
                target.display(),
                header.data_size()
            )),
            Err(e) => {
                formatter.print_error(&e.to_string());
                failed += 1;
            }
        }
    }

    finish(failed, files.len())
}

/// Show header information for WAV files
pub fn command_info(
    files: &[PathBuf],
    detailed: bool,
    formatter: &OutputFormatter,
    writer: &mut dyn Write,
) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::InvalidArgs("No files specified".to_string()));
    }

    let mut failed = 0;
    for path in files {
        match describe_file(path, detailed) {
            Ok(value) => formatter.output_value(&value, writer)?,
            Err(e) => {
                formatter.print_error(&e.to_string());
                failed += 1;
            }
        }
    }

    finish(failed, files.len())
}

/// Recover the payload of a WAV file
pub fn command_extract(
    file: &Path,
    output: &Path,
    force: bool,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    if !file.is_file() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }
    ensure_writable(output, force)?;

    let header = extract_file(file, output)?;
    formatter.print_debug(&format!("Header: {}", describe_params(&header.params())));
    formatter.print_success(&format!(
        "{} -> {} ({} bytes)",
        file.display(),
        output.display(),
        header.data_size()
    ));
    Ok(())
}

/// Batch convert a directory
pub fn command_batch(
    directory: &Path,
    pattern: &str,
    params: &AudioParams,
    force: bool,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    params.validate()?;

    let files: Vec<PathBuf> = collect_files(directory, pattern, formatter)?
        .into_iter()
        .filter(|path| {
            let is_wav = path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case(WAV_EXTENSION));
            if is_wav {
                formatter.print_debug(&format!("Skipping {}", path.display()));
            }
            !is_wav
        })
        .collect();

    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }

    formatter.print_info(&format!("Processing {} files...", total));

    let mut progress = ProgressBar::new(total, !formatter.is_quiet());
    let mut errors = Vec::new();

    for input in &files {
        let target = derive_output_path(input);
        if let Err(e) = convert_one(input, &target, params, force) {
            errors.push(e.to_string());
        }
        progress.increment(&input.display().to_string());
    }

    for message in &errors {
        formatter.print_error(message);
    }
    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        total - errors.len(),
        errors.len()
    ));

    finish(errors.len(), total)
}

/// Find files under `directory` matching `pattern`.
///
/// Patterns without wildcards are searched for recursively.
pub fn collect_files(
    directory: &Path,
    pattern: &str,
    formatter: &OutputFormatter,
) -> CliResult<Vec<PathBuf>> {
    let base = Pattern::escape(&directory.to_string_lossy());
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", base, pattern)
    } else {
        format!("{}/**/{}", base, pattern)
    };

    let mut files = Vec::new();
    for entry in glob(&glob_pattern).map_err(|e| CliError::Pattern(e.to_string()))? {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                formatter.print_error(&format!("Error reading path: {}", e));
            }
        }
    }

    Ok(files)
}

fn convert_one(
    input: &Path,
    output: &Path,
    params: &AudioParams,
    force: bool,
) -> CliResult<WavHeader> {
    if !input.is_file() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }
    ensure_writable(output, force)?;

    Ok(convert_file(input, output, params)?)
}

fn ensure_writable(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Ok(())
}

/// Header fields plus file details as a JSON object
fn describe_file(path: &Path, detailed: bool) -> CliResult<Value> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let header = inspect_file(path)?;
    let mut value = serde_json::to_value(&header)?;

    if let Value::Object(map) = &mut value {
        map.insert("file".to_string(), json!(path.display().to_string()));

        if detailed {
            let metadata = fs::metadata(path)?;
            let modified = metadata.modified().ok().map(|mtime| {
                DateTime::<Utc>::from(mtime)
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
            });

            map.insert("file_size".to_string(), json!(metadata.len()));
            map.insert("modified".to_string(), json!(modified));
            map.insert("duration_secs".to_string(), json!(header.duration_secs()));
        }
    }

    Ok(value)
}

fn describe_params(params: &AudioParams) -> String {
    format!(
        "{} ch, {} Hz, {}-bit",
        params.channels, params.sample_rate, params.bits_per_sample
    )
}

fn finish(failed: usize, total: usize) -> CliResult<()> {
    if failed > 0 {
        return Err(CliError::Failed { failed, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::tests::recording_formatter;
    use crate::cli::output::{Level, OutputFormat};

    fn write_blob(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![0xABu8; len]).unwrap();
        path
    }

    #[test]
    fn test_convert_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "blob.bin", 10);
        let (formatter, sink) = recording_formatter(OutputFormat::Pretty, false);

        command_convert(&[input], None, &AudioParams::default(), false, &formatter).unwrap();

        let bytes = fs::read(dir.path().join("blob.wav")).unwrap();
        assert_eq!(bytes.len(), 54);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(sink.count(Level::Success), 1);
    }

    #[test]
    fn test_convert_uppercase_wav_input_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "loop.WAV", 8);
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, true);

        command_convert(&[input.clone()], None, &AudioParams::default(), true, &formatter)
            .unwrap();

        assert_eq!(fs::read(&input).unwrap(), vec![0xABu8; 8]);
        assert_eq!(
            fs::read(dir.path().join("loop.converted.wav")).unwrap().len(),
            52
        );
    }

    #[test]
    fn test_convert_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "blob.bin", 10);
        let output = dir.path().join("out.wav");
        fs::write(&output, b"keep me").unwrap();
        let (formatter, sink) = recording_formatter(OutputFormat::Pretty, false);

        let result = command_convert(
            &[input.clone()],
            Some(output.as_path()),
            &AudioParams::default(),
            false,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::Failed { failed: 1, total: 1 })));
        assert_eq!(fs::read(&output).unwrap(), b"keep me");
        assert_eq!(sink.count(Level::Error), 1);

        command_convert(&[input], Some(output.as_path()), &AudioParams::default(), true, &formatter)
            .unwrap();
        assert_eq!(fs::read(&output).unwrap().len(), 54);
    }

    #[test]
    fn test_convert_output_requires_single_input() {
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, false);
        let files = vec![PathBuf::from("a"), PathBuf::from("b")];

        let result = command_convert(
            &files,
            Some(Path::new("out.wav")),
            &AudioParams::default(),
            false,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn test_convert_continues_after_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = write_blob(dir.path(), "present.bin", 4);
        let missing = dir.path().join("missing.bin");
        let (formatter, sink) = recording_formatter(OutputFormat::Pretty, false);

        let result = command_convert(
            &[missing, present],
            None,
            &AudioParams::default(),
            false,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::Failed { failed: 1, total: 2 })));
        assert!(dir.path().join("present.wav").exists());
        assert_eq!(sink.count(Level::Error), 1);
        assert_eq!(sink.count(Level::Success), 1);
    }

    #[test]
    fn test_convert_rejects_bad_params_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "blob.bin", 4);
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, false);

        let result = command_convert(
            &[input],
            None,
            &AudioParams::new(0, 44_100, 16),
            false,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::Codec(_))));
        assert!(!dir.path().join("blob.wav").exists());
    }

    #[test]
    fn test_info_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "blob.bin", 352_800);
        let wav = dir.path().join("blob.wav");
        convert_file(&input, &wav, &AudioParams::default()).unwrap();
        let (formatter, _) = recording_formatter(OutputFormat::Json, false);

        let mut out = Vec::new();
        command_info(&[wav], true, &formatter, &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["channels"], 2);
        assert_eq!(value["byte_rate"], 176_400);
        assert_eq!(value["data_size"], 352_800);
        assert_eq!(value["riff_size"], 352_836);
        assert_eq!(value["file_size"], 352_844);
        assert_eq!(value["duration_secs"], 2.0);
        assert!(value["modified"].as_str().unwrap().ends_with("UTC"));
    }

    #[test]
    fn test_info_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = write_blob(dir.path(), "bogus.wav", 100);
        let (formatter, sink) = recording_formatter(OutputFormat::Json, false);

        let mut out = Vec::new();
        let result = command_info(&[bogus], false, &formatter, &mut out);
        assert!(matches!(result, Err(CliError::Failed { failed: 1, total: 1 })));
        assert!(out.is_empty());

        let lines = sink.lines.borrow();
        assert!(lines[0].1.contains("Unknown tag at offset 0"));
    }

    #[test]
    fn test_extract_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_blob(dir.path(), "blob.bin", 33);
        let wav = dir.path().join("blob.wav");
        let restored = dir.path().join("restored.bin");
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, true);

        command_convert(
            &[input.clone()],
            Some(wav.as_path()),
            &AudioParams::new(1, 8_000, 8),
            false,
            &formatter,
        )
        .unwrap();
        command_extract(&wav, &restored, false, &formatter).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, false);
        let result = command_extract(
            &dir.path().join("nope.wav"),
            &dir.path().join("out.bin"),
            false,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_collect_files_wildcard_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write_blob(dir.path(), "a.bin", 1);
        write_blob(dir.path(), "b.bin", 1);
        write_blob(dir.path(), "c.txt", 1);
        write_blob(dir.path(), "nested/d.bin", 1);
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, false);

        let files = collect_files(dir.path(), "*.bin", &formatter).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.bin", "b.bin"]);

        let nested = collect_files(dir.path(), "d.bin", &formatter).unwrap();
        assert_eq!(nested, vec![dir.path().join("nested").join("d.bin")]);
    }

    #[test]
    fn test_collect_files_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, false);
        let result = collect_files(dir.path(), "[*.bin", &formatter);
        assert!(matches!(result, Err(CliError::Pattern(_))));
    }

    #[test]
    fn test_batch_converts_and_skips_wav() {
        let dir = tempfile::tempdir().unwrap();
        write_blob(dir.path(), "one.bin", 2);
        write_blob(dir.path(), "two.bin", 6);
        write_blob(dir.path(), "old.wav", 6);
        let (formatter, _) = recording_formatter(OutputFormat::Pretty, true);

        command_batch(dir.path(), "*", &AudioParams::default(), false, &formatter).unwrap();

        assert_eq!(fs::read(dir.path().join("one.wav")).unwrap().len(), 46);
        assert_eq!(fs::read(dir.path().join("two.wav")).unwrap().len(), 50);
        assert!(!dir.path().join("old.converted.wav").exists());
    }

    #[test]
    fn test_batch_empty_match() {
        let dir = tempfile::tempdir().unwrap();
        let (formatter, sink) = recording_formatter(OutputFormat::Pretty, false);

        command_batch(dir.path(), "*.bin", &AudioParams::default(), false, &formatter).unwrap();
        assert_eq!(sink.count(Level::Info), 1);
    }
}
