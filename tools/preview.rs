/// Preview: interactive shell for building a clause and watching it realise.
///
/// Usage: preview [--lexicon <path>] [--config <path>] [--html]
///
/// Commands:
///   clause <subject> / <verb> [/ <object>]  start a new clause
///   tense <past|present|future>            set the tense
///   question <type|none>                   ask a question of the clause
///   toggle <negated|passive|perfect|progressive>
///   modal <word|none>                      set or clear a modal
///   modifier <text>                        add a modifier
///   trace                                  show the tree after each stage
///   word <base> [category]                 show a lexicon entry
///   help                                   list commands
///   quit                                   exit

use nlg_realiser::core::factory::NlgFactory;
use nlg_realiser::core::format::HtmlFormatter;
use nlg_realiser::core::lexicon::Lexicon;
use nlg_realiser::core::realiser::Realiser;
use nlg_realiser::schema::category::LexicalCategory;
use nlg_realiser::schema::element::Element;
use nlg_realiser::schema::feature::{Feature, InterrogativeType, Tense};
use nlg_realiser::schema::phrase::PhraseElement;
use std::io::{self, BufRead, Write};

/// The clause under construction, kept as its inputs so it can be rebuilt
/// after every change.
#[derive(Debug, Default)]
struct Session {
    subject: String,
    verb: String,
    object: Option<String>,
    tense: Option<Tense>,
    question: Option<InterrogativeType>,
    modal: Option<String>,
    negated: bool,
    passive: bool,
    perfect: bool,
    progressive: bool,
    modifiers: Vec<String>,
}

impl Session {
    fn is_empty(&self) -> bool {
        self.verb.is_empty()
    }

    fn build(&self, f: &NlgFactory) -> PhraseElement {
        let mut clause = f.create_clause_sv(noun_phrase(f, &self.subject), self.verb.as_str());
        if let Some(object) = &self.object {
            f.set_object(&mut clause, noun_phrase(f, object));
        }
        if let Some(tense) = self.tense {
            clause.set_feature(Feature::Tense, tense);
        }
        if let Some(question) = self.question {
            clause.set_feature(Feature::InterrogativeType, question);
        }
        if let Some(modal) = &self.modal {
            clause.set_feature(Feature::Modal, modal.as_str());
        }
        clause.set_feature(Feature::Negated, self.negated);
        clause.set_feature(Feature::Passive, self.passive);
        clause.set_feature(Feature::Perfect, self.perfect);
        clause.set_feature(Feature::Progressive, self.progressive);
        for modifier in &self.modifiers {
            f.add_modifier(&mut clause, modifier.as_str());
        }
        clause
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut builder = Realiser::builder();
    let mut html = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                builder = builder.lexicon_path(&args[i]);
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                builder = builder.config_path(&args[i]);
            }
            "--html" => html = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    if html {
        builder = builder.with_formatter(Some(Box::new(HtmlFormatter)));
    }

    let realiser = match builder.build() {
        Ok(realiser) => realiser,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Type 'help' for commands.\n");

    let mut session = Session::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
                continue;
            }
            "clause" => {
                let parts: Vec<&str> = rest.split('/').map(str::trim).collect();
                if parts.len() < 2 || parts[1].is_empty() {
                    println!("Usage: clause <subject> / <verb> [/ <object>]");
                    continue;
                }
                session = Session {
                    subject: parts[0].to_string(),
                    verb: parts[1].to_string(),
                    object: parts.get(2).filter(|o| !o.is_empty()).map(|o| o.to_string()),
                    ..Session::default()
                };
            }
            "tense" => match parse_tense(rest) {
                Some(tense) => session.tense = Some(tense),
                None => {
                    println!("Unknown tense: {}", rest);
                    continue;
                }
            },
            "question" => {
                if rest == "none" {
                    session.question = None;
                } else if let Some(question) = parse_question(rest) {
                    session.question = Some(question);
                } else {
                    println!("Unknown question type: {}", rest);
                    println!("  yesno, who_subject, who_object, who_indirect, what_subject,");
                    println!("  what_object, why, where, how, how_predicate, how_many");
                    continue;
                }
            }
            "toggle" => {
                let flag = match rest {
                    "negated" => &mut session.negated,
                    "passive" => &mut session.passive,
                    "perfect" => &mut session.perfect,
                    "progressive" => &mut session.progressive,
                    _ => {
                        println!("Usage: toggle <negated|passive|perfect|progressive>");
                        continue;
                    }
                };
                *flag = !*flag;
                println!("{} = {}", rest, flag);
            }
            "modal" => {
                session.modal = match rest {
                    "" | "none" => None,
                    modal => Some(modal.to_string()),
                };
            }
            "modifier" => {
                if rest.is_empty() {
                    println!("Usage: modifier <text>");
                    continue;
                }
                session.modifiers.push(rest.to_string());
            }
            "trace" => {
                if session.is_empty() {
                    println!("No clause yet. Start one with 'clause'.");
                    continue;
                }
                let clause = session.build(realiser.factory());
                let (_, snapshots) = realiser.trace(&Element::Phrase(clause));
                for snapshot in snapshots {
                    println!("--- {:?} ---", snapshot.stage);
                    println!("{}", snapshot.tree);
                }
                continue;
            }
            "word" => {
                let mut words = rest.split_whitespace();
                let Some(base) = words.next() else {
                    println!("Usage: word <base> [category]");
                    continue;
                };
                let category = match words.next() {
                    Some(name) => match parse_category(name) {
                        Some(category) => category,
                        None => {
                            println!("Unknown category: {}", name);
                            continue;
                        }
                    },
                    None => LexicalCategory::Any,
                };
                let lexicon = realiser.lexicon();
                if !lexicon.has_word(base, category) && !lexicon.has_word_from_variant(base, category) {
                    println!("'{}' is not in the lexicon; a regular entry would be used.", base);
                }
                println!("{:#?}", lexicon.lookup_word(base, category));
                continue;
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
                continue;
            }
        }

        if !session.is_empty() {
            let clause = session.build(realiser.factory());
            println!("{}", realiser.realise_sentence(&Element::Phrase(clause)));
        }
    }
}

/// "the monkey" becomes a noun phrase with a specifier when the first word
/// is a determiner; anything else goes to the factory as it is.
fn noun_phrase(f: &NlgFactory, text: &str) -> PhraseElement {
    match text.split_once(' ') {
        Some((first, rest)) if f.lexicon().has_word(first, LexicalCategory::Determiner) => {
            f.create_noun_phrase_with_specifier(first, rest)
        }
        _ => f.create_noun_phrase(text),
    }
}

fn parse_tense(s: &str) -> Option<Tense> {
    match s {
        "past" => Some(Tense::Past),
        "present" => Some(Tense::Present),
        "future" => Some(Tense::Future),
        _ => None,
    }
}

fn parse_question(s: &str) -> Option<InterrogativeType> {
    match s {
        "yesno" | "yes_no" => Some(InterrogativeType::YesNo),
        "who_subject" => Some(InterrogativeType::WhoSubject),
        "who_object" => Some(InterrogativeType::WhoObject),
        "who_indirect" => Some(InterrogativeType::WhoIndirectObject),
        "what_subject" => Some(InterrogativeType::WhatSubject),
        "what_object" => Some(InterrogativeType::WhatObject),
        "why" => Some(InterrogativeType::Why),
        "where" => Some(InterrogativeType::Where),
        "how" => Some(InterrogativeType::How),
        "how_predicate" => Some(InterrogativeType::HowPredicate),
        "how_many" => Some(InterrogativeType::HowMany),
        _ => None,
    }
}

/// Category names as written in lexicon files, any case.
fn parse_category(s: &str) -> Option<LexicalCategory> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let name: String = first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect();
    ron::from_str(&name).ok()
}

fn print_usage() {
    println!("Preview: interactive shell for realising clauses.");
    println!();
    println!("Usage: preview [--lexicon <path>] [--config <path>] [--html]");
    println!();
    println!("  --lexicon <path>  RON lexicon to use instead of the bundled one");
    println!("  --config <path>   RON realiser settings");
    println!("  --html            Format output as HTML");
}

fn print_help() {
    println!("Commands:");
    println!("  clause <subject> / <verb> [/ <object>]  Start a new clause");
    println!("  tense <past|present|future>            Set the tense");
    println!("  question <type|none>                   Turn the clause into a question");
    println!("  toggle <negated|passive|perfect|progressive>");
    println!("  modal <word|none>                      Set or clear a modal verb");
    println!("  modifier <text>                        Add a modifier to the clause");
    println!("  trace                                  Show the tree after each stage");
    println!("  word <base> [category]                 Show a lexicon entry");
    println!("  help                                   Show this help");
    println!("  quit                                   Exit");
}
