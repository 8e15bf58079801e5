/// Conjunction reduction: coordinating two clauses while eliding the
/// material they share at their left or right edge.

use crate::core::aggregation::phrase_set::PhraseSet;
use crate::core::aggregation::AggregationRule;
use crate::core::factory::NlgFactory;
use crate::schema::element::Element;
use crate::schema::feature::Feature;
use crate::schema::phrase::PhraseElement;

/// "John ate and drank": shared left-edge phrases are kept in the first
/// clause only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardConjunctionReductionRule;

/// "John ate and Mary drank the wine": shared right-edge phrases are kept
/// in the last clause only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardConjunctionReductionRule;

impl AggregationRule for ForwardConjunctionReductionRule {
    fn name(&self) -> &'static str {
        "forward-conjunction-reduction"
    }

    fn apply_pair(&self, factory: &NlgFactory, previous: &Element, next: &Element) -> Option<Element> {
        reduce(factory, previous, next, PhraseSet::left_periphery, PhraseSet::elide_rightmost)
    }
}

impl AggregationRule for BackwardConjunctionReductionRule {
    fn name(&self) -> &'static str {
        "backward-conjunction-reduction"
    }

    fn apply_pair(&self, factory: &NlgFactory, previous: &Element, next: &Element) -> Option<Element> {
        reduce(factory, previous, next, PhraseSet::right_periphery, PhraseSet::elide_leftmost)
    }
}

fn reduce(
    factory: &NlgFactory,
    previous: &Element,
    next: &Element,
    periphery: fn(&[PhraseElement]) -> Vec<PhraseSet>,
    elide: fn(&PhraseSet, &mut [PhraseElement]),
) -> Option<Element> {
    let (Element::Phrase(first), Element::Phrase(second)) = (previous, next) else {
        return None;
    };
    if !first.is_clause() || !second.is_clause() {
        return None;
    }
    if first.flag(Feature::Passive) || second.flag(Feature::Passive) {
        return None;
    }

    let mut clauses = [first.clone(), second.clone()];
    let mut reduced = false;
    for set in periphery(&clauses) {
        if set.lemma_identical(&clauses) {
            elide(&set, &mut clauses);
            reduced = true;
        }
    }
    if !reduced {
        return None;
    }
    let [first, second] = clauses;
    Some(Element::Coordinated(factory.create_coordinated_phrase(first, second)))
}
