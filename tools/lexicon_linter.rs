/// Lexicon Linter: checks RON lexicons for ids and stored irregular forms.
///
/// Usage: lexicon_linter <lexicon.ron | lexicon_dir> [--strict]

use nlg_realiser::core::lexicon::{missing_stored_forms, MemoryLexicon};
use nlg_realiser::schema::category::LexicalCategory;
use nlg_realiser::schema::feature::{Feature, Inflection};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: lexicon_linter <lexicon.ron | lexicon_dir> [--strict]");
        process::exit(0);
    }

    let target = Path::new(&args[1]);
    // With --strict, warnings fail the run too.
    let strict = args[2..].iter().any(|a| a == "--strict");

    let mut files = Vec::new();
    if target.is_file() {
        files.push(target.to_path_buf());
    } else if target.is_dir() {
        collect_ron_files(target, &mut files);
        files.sort();
    } else {
        eprintln!("ERROR: Path '{}' does not exist", target.display());
        process::exit(1);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut lexicons = Vec::new();

    for path in &files {
        match MemoryLexicon::load_from_ron(path) {
            Ok(lexicon) => {
                println!("  Loaded: {} ({} words)", path.display(), lexicon.len());
                lexicons.push((path.clone(), lexicon));
            }
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    for (path, lexicon) in &lexicons {
        lint_lexicon(path, lexicon, &mut errors, &mut warnings);
    }
    check_shared_ids(&lexicons, &mut warnings);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} files, {} errors, {} warnings",
        files.len(),
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() && (!strict || warnings.is_empty()) {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn collect_ron_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_ron_files(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                files.push(path);
            }
        }
    }
}

fn lint_lexicon(
    path: &Path,
    lexicon: &MemoryLexicon,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let file = path.display();
    let mut seen: FxHashMap<(String, LexicalCategory), usize> = FxHashMap::default();

    for word in lexicon.iter() {
        let name = format!("'{}' ({:?})", word.base_form, word.category);

        if word.id.is_none() && !word.features.flag(Feature::Proper) {
            warnings.push(format!("{}: {} has no id", file, name));
        }

        *seen
            .entry((word.base_form.clone(), word.category))
            .or_default() += 1;

        for feature in missing_stored_forms(word) {
            errors.push(format!(
                "{}: {} is irregular but has no stored {:?} form",
                file, name, feature
            ));
        }

        if word.inflection_variants.contains(&Inflection::Uncount)
            && !word.inflection_variants.contains(&Inflection::Regular)
            && word.stored_form(Feature::Plural).is_some()
        {
            warnings.push(format!("{}: {} is uncountable but stores a plural", file, name));
        }

        if word.base_form != word.base_form.trim() {
            errors.push(format!("{}: {} has surrounding whitespace", file, name));
        }
    }

    let mut repeated: Vec<_> = seen.into_iter().filter(|(_, count)| *count > 1).collect();
    repeated.sort_by(|(a, _), (b, _)| a.0.cmp(&b.0));
    for ((base, category), count) in repeated {
        warnings.push(format!(
            "{}: '{}' ({:?}) has {} entries; lookups will pick the first",
            file, base, category, count
        ));
    }
}

/// Ids shared across files are legal when the lexicons are chained, but
/// only the first lexicon's entry will ever be found by id.
fn check_shared_ids(lexicons: &[(PathBuf, MemoryLexicon)], warnings: &mut Vec<String>) {
    let mut owners: FxHashMap<&str, &Path> = FxHashMap::default();
    for (path, lexicon) in lexicons {
        for word in lexicon.iter() {
            let Some(id) = word.id.as_deref() else {
                continue;
            };
            if let Some(first) = owners.get(id) {
                warnings.push(format!(
                    "id {} ('{}') in {} is already used in {}",
                    id,
                    word.base_form,
                    path.display(),
                    first.display()
                ));
            } else {
                owners.insert(id, path);
            }
        }
    }
}
