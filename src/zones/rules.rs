use crate::core::config::DropRuleKind;
use crate::core::element::ElementType;
use crate::zones::tower::model::TowerModel;

/// Predicate gating whether a candidate may join a tower. Stateless; a
/// candidate must satisfy every registered rule.
pub trait DropRule {
    fn can_add_element(&self, candidate: &ElementType, tower: &TowerModel) -> bool;
}

pub struct NonRestrictionRule;

impl DropRule for NonRestrictionRule {
    fn can_add_element(&self, _candidate: &ElementType, _tower: &TowerModel) -> bool {
        true
    }
}

/// Accepts only candidates matching the bottom element's type; anything goes
/// while the tower is empty.
pub struct OnlyOneColorRule;

impl DropRule for OnlyOneColorRule {
    fn can_add_element(&self, candidate: &ElementType, tower: &TowerModel) -> bool {
        match tower.elements().first() {
            Some(bottom) => bottom.element_type.id == candidate.id,
            None => true,
        }
    }
}

pub fn rules_for(kind: DropRuleKind) -> Vec<Box<dyn DropRule>> {
    match kind {
        DropRuleKind::NonRestriction => vec![Box::new(NonRestrictionRule)],
        DropRuleKind::OnlyOneColor => vec![Box::new(OnlyOneColorRule)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::tower::model::TowerElement;

    fn ty(id: &str) -> ElementType {
        ElementType::new(id, format!("{id}.png"))
    }

    fn tower_with_bottom(id: &str) -> TowerModel {
        let mut tower = TowerModel::new();
        tower.add_element(TowerElement::with_offset(ty(id), 0.0, 10.0));
        tower
    }

    #[test]
    fn non_restriction_accepts_anything() {
        let tower = tower_with_bottom("Red");
        assert!(NonRestrictionRule.can_add_element(&ty("Blue"), &tower));
    }

    #[test]
    fn only_one_color_matches_against_the_bottom_element() {
        let tower = tower_with_bottom("Red");
        assert!(OnlyOneColorRule.can_add_element(&ty("Red"), &tower));
        assert!(!OnlyOneColorRule.can_add_element(&ty("Blue"), &tower));
    }

    #[test]
    fn only_one_color_accepts_any_first_element() {
        let tower = TowerModel::new();
        assert!(OnlyOneColorRule.can_add_element(&ty("Blue"), &tower));
    }
}
