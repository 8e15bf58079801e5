/// Aggregation: merging clauses that share material into a single
/// coordinated structure before realisation.
///
/// Rules work on phrase specifications and never modify their inputs;
/// a successful merge returns a new element. An `Aggregator` runs an
/// ordered list of rules over a sequence of clauses.

mod clause_coordination;
mod conjunction_reduction;
mod elision;
mod phrase_set;

pub use clause_coordination::ClauseCoordinationRule;
pub use conjunction_reduction::{BackwardConjunctionReductionRule, ForwardConjunctionReductionRule};
pub use elision::ElisionAggregator;
pub use phrase_set::PhraseSet;

use crate::core::factory::NlgFactory;
use crate::schema::element::Element;
use crate::schema::phrase::CoordinatedPhraseElement;

/// A pairwise merge rule.
pub trait AggregationRule {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Merge two phrases, or `None` when the rule does not apply.
    fn apply_pair(&self, factory: &NlgFactory, previous: &Element, next: &Element) -> Option<Element>;

    /// Merge a sequence. Each surviving phrase is offered every later one
    /// in turn; a merged result keeps absorbing later phrases, and absorbed
    /// phrases drop out of the sequence.
    fn apply_all(&self, factory: &NlgFactory, phrases: &[Element]) -> Vec<Element> {
        if phrases.len() == 1 {
            return vec![self.apply(factory, &phrases[0])];
        }
        let mut absorbed = vec![false; phrases.len()];
        let mut results = Vec::with_capacity(phrases.len());
        for i in 0..phrases.len() {
            if absorbed[i] {
                continue;
            }
            let mut current = phrases[i].clone();
            for j in (i + 1)..phrases.len() {
                if absorbed[j] {
                    continue;
                }
                if let Some(merged) = self.apply_pair(factory, &current, &phrases[j]) {
                    log::debug!("{} merged phrases {} and {}", self.name(), i, j);
                    current = merged;
                    absorbed[j] = true;
                }
            }
            results.push(current);
        }
        results
    }

    /// Apply the rule inside a single phrase: the coordinates of a
    /// coordination are aggregated among themselves. Other phrases come
    /// back unchanged.
    fn apply(&self, factory: &NlgFactory, phrase: &Element) -> Element {
        let Element::Coordinated(coordinated) = phrase else {
            return phrase.clone();
        };
        let mut merged = self.apply_all(factory, &coordinated.coordinates);
        let mut result = if merged.len() == 1 {
            merged.remove(0)
        } else {
            Element::Coordinated(CoordinatedPhraseElement::with_coordinates(merged))
        };
        for (feature, value) in coordinated.features.iter() {
            result.set_feature(*feature, value.clone());
        }
        result
    }
}

/// Runs aggregation rules in order over a set of phrases.
pub struct Aggregator {
    factory: NlgFactory,
    rules: Vec<Box<dyn AggregationRule>>,
}

impl Aggregator {
    pub fn new(factory: NlgFactory) -> Self {
        Self {
            factory,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: impl AggregationRule + 'static) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn add_rule(&mut self, rule: impl AggregationRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn AggregationRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Run every rule over a single phrase.
    pub fn realise(&self, element: &Element) -> Element {
        self.rules
            .iter()
            .fold(element.clone(), |current, rule| rule.apply(&self.factory, &current))
    }

    /// Run every rule over the sequence; each rule sees the output of the
    /// one before it.
    pub fn realise_all(&self, elements: &[Element]) -> Vec<Element> {
        let mut current = elements.to_vec();
        for rule in &self.rules {
            current = rule.apply_all(&self.factory, &current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::MemoryLexicon;
    use crate::schema::feature::Feature;
    use std::sync::Arc;

    pub(super) fn factory() -> NlgFactory {
        NlgFactory::new(Arc::new(MemoryLexicon::default_lexicon().unwrap()))
    }

    /// Merges anything with a canned first element into that element.
    struct KeepFirst;

    impl AggregationRule for KeepFirst {
        fn name(&self) -> &'static str {
            "keep-first"
        }

        fn apply_pair(&self, _: &NlgFactory, previous: &Element, next: &Element) -> Option<Element> {
            (previous.realisation() == next.realisation()).then(|| previous.clone())
        }
    }

    #[test]
    fn merges_are_transitive() {
        let f = factory();
        let phrases = vec![
            Element::canned("a"),
            Element::canned("b"),
            Element::canned("a"),
            Element::canned("b"),
            Element::canned("a"),
        ];
        let merged = KeepFirst.apply_all(&f, &phrases);
        let texts: Vec<&str> = merged.iter().map(Element::realisation).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn single_coordination_is_aggregated_internally() {
        let f = factory();
        let mut c = CoordinatedPhraseElement::with_coordinates(vec![
            Element::canned("a"),
            Element::canned("a"),
        ]);
        c.features.set(Feature::Possessive, true);
        let result = KeepFirst.apply(&f, &Element::Coordinated(c));
        assert_eq!(result.realisation(), "a");
        assert!(result.flag(Feature::Possessive));

        let plain = Element::canned("b");
        assert_eq!(KeepFirst.apply(&f, &plain), plain);
    }

    #[test]
    fn aggregator_chains_rules() {
        let aggregator = Aggregator::new(factory())
            .with_rule(KeepFirst)
            .with_rule(ClauseCoordinationRule);
        assert_eq!(aggregator.rules().count(), 2);
        let merged = aggregator.realise_all(&[Element::canned("x"), Element::canned("x")]);
        assert_eq!(merged.len(), 1);
    }
}
