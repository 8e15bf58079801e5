/// Elision over syntax-realised clauses: constituents that repeat
/// word for word are dropped from one of the two clauses before they are
/// coordinated.

use crate::core::aggregation::AggregationRule;
use crate::core::factory::NlgFactory;
use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::LexicalCategory;
use crate::schema::element::Element;
use crate::schema::feature::DiscourseFunction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Periphery {
    Left,
    Verb,
    Right,
}

/// Realises the syntax of two clauses, pairs up their constituents by
/// position, and elides the repeats: before the verb the first copy is
/// kept, after it the last.
///
/// "John eats fish" + "John drinks beer" reads "John eats fish and drinks
/// beer"; "John eats fish" + "Mary eats fish" reads "John eats and Mary
/// eats fish".
#[derive(Clone)]
pub struct ElisionAggregator {
    syntax: SyntaxProcessor,
}

impl ElisionAggregator {
    pub fn new(factory: NlgFactory) -> Self {
        Self {
            syntax: SyntaxProcessor::new(factory),
        }
    }

    /// Coordinate the two clauses with their repeats elided, or `None`
    /// when their structures do not line up or nothing repeats.
    pub fn aggregate(&self, first: &Element, second: &Element) -> Option<Element> {
        let mut first = self.syntax.realise(first)?;
        let mut second = self.syntax.realise(second)?;
        if !matches!(first, Element::List(_)) || !matches!(second, Element::List(_)) {
            return None;
        }

        let paths = constituent_paths(&first);
        if paths != constituent_paths(&second) {
            return None;
        }

        let mut periphery = Periphery::Left;
        let mut elisions: Vec<(&[usize], bool)> = Vec::new();
        for path in &paths {
            let (Some(left), Some(right)) = (at(&first, path), at(&second, path)) else {
                return None;
            };
            if left.category() != right.category()
                || left.discourse_function() != right.discourse_function()
            {
                return None;
            }
            periphery = match periphery {
                Periphery::Left if left.lexical_category() == Some(LexicalCategory::Verb) => {
                    Periphery::Verb
                }
                Periphery::Verb => Periphery::Right,
                other => other,
            };
            if periphery != Periphery::Verb && left == right {
                elisions.push((path, periphery == Periphery::Left));
            }
        }
        if elisions.is_empty() {
            return None;
        }

        for (path, keep_first) in elisions {
            let target = if keep_first { &mut second } else { &mut first };
            if let Some(element) = at_mut(target, path) {
                element.set_elided(true);
            }
        }
        let factory = self.syntax.factory();
        Some(Element::Coordinated(factory.create_coordinated_phrase(first, second)))
    }
}

impl AggregationRule for ElisionAggregator {
    fn name(&self) -> &'static str {
        "elision"
    }

    fn apply_pair(&self, _: &NlgFactory, previous: &Element, next: &Element) -> Option<Element> {
        self.aggregate(previous, next)
    }
}

/// Index paths of the constituents of a realised clause. The verb group
/// is opened up so the verb and its complements pair individually.
fn constituent_paths(clause: &Element) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();
    collect_paths(clause, &mut Vec::new(), &mut paths);
    paths
}

fn collect_paths(element: &Element, prefix: &mut Vec<usize>, paths: &mut Vec<Vec<usize>>) {
    let Element::List(list) = element else {
        return;
    };
    for (index, child) in list.children.iter().enumerate() {
        prefix.push(index);
        match child {
            Element::List(_) if child.discourse_function() == Some(DiscourseFunction::VerbPhrase) => {
                collect_paths(child, prefix, paths)
            }
            _ => paths.push(prefix.clone()),
        }
        prefix.pop();
    }
}

fn at<'a>(element: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter().try_fold(element, |current, &index| match current {
        Element::List(list) => list.children.get(index),
        _ => None,
    })
}

fn at_mut<'a>(element: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    path.iter().try_fold(element, |current, &index| match current {
        Element::List(list) => list.children.get_mut(index),
        _ => None,
    })
}
