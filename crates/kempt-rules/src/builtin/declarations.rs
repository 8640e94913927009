//! Declaration style: modifiers, type names and attributes

use kempt_core::syntax::ast::{AstNode, AttributeList, ModifierList, TypeRef};
use kempt_core::syntax::nodes::first_significant_token;
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Violation, rule_ids};

use super::token_violation;

/// Modifiers out of access, `static`, other order
pub struct ModifierOrder;

impl Analyzer for ModifierOrder {
    fn rule_id(&self) -> &'static str {
        rule_ids::MODIFIER_ORDER
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .syntax()
            .descendants()
            .filter_map(ModifierList::cast)
            .filter(|list| !list.is_ordered())
            .filter_map(|list| list.modifiers().next())
            .map(|first| {
                token_violation(self.rule_id(), &first)
                    .with_message("Order modifiers as access, static, then the rest")
            })
            .collect()
    }
}

/// Framework type names with a keyword alias, such as `Int32`
pub struct UseBuiltinTypeAlias;

impl Analyzer for UseBuiltinTypeAlias {
    fn rule_id(&self) -> &'static str {
        rule_ids::USE_BUILTIN_TYPE_ALIAS
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .syntax()
            .descendants()
            .filter_map(TypeRef::cast)
            .filter_map(|type_ref| {
                let alias = type_ref.builtin_alias()?.keyword_text()?;
                let first = first_significant_token(type_ref.syntax())?;
                Some(token_violation(self.rule_id(), &first).with_message(format!("Use '{alias}'")))
            })
            .collect()
    }
}

/// Attribute lists holding more than one attribute
pub struct SplitAttributeLists;

impl Analyzer for SplitAttributeLists {
    fn rule_id(&self) -> &'static str {
        rule_ids::SPLIT_ATTRIBUTE_LISTS
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .syntax()
            .descendants()
            .filter_map(AttributeList::cast)
            .filter(|list| list.attributes().nth(1).is_some())
            .filter_map(|list| list.l_bracket())
            .map(|open| {
                token_violation(self.rule_id(), &open)
                    .with_message("Place each attribute in its own brackets")
            })
            .collect()
    }
}
