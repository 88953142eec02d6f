use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::TableDef;

/// Order tables so that every table follows the tables it references.
///
/// Ties are broken by declaration order, so the result is deterministic for a
/// given input slice.
pub fn dependency_order(tables: &[&TableDef]) -> Result<Vec<&'static str>> {
    let index: BTreeMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(position, table)| (table.name, position))
        .collect();

    // parent position -> child positions
    let mut children: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    let mut indegree = vec![0_usize; tables.len()];

    for (position, table) in tables.iter().enumerate() {
        let mut parents = BTreeSet::new();
        for parent in table.parents() {
            let parent_position = *index.get(parent).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "table '{}' references unknown table '{}'",
                    table.name, parent
                ))
            })?;
            parents.insert(parent_position);
        }
        for parent_position in parents {
            if children.entry(parent_position).or_default().insert(position) {
                indegree[position] += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = indegree
        .iter()
        .enumerate()
        .filter_map(|(position, count)| (*count == 0).then_some(position))
        .collect();
    let mut order = Vec::with_capacity(tables.len());

    while let Some(position) = ready.pop_first() {
        order.push(tables[position].name);

        if let Some(targets) = children.get(&position) {
            for &target in targets {
                indegree[target] = indegree[target].saturating_sub(1);
                if indegree[target] == 0 {
                    ready.insert(target);
                }
            }
        }
    }

    if order.len() == tables.len() {
        Ok(order)
    } else {
        let cycle: Vec<&str> = indegree
            .iter()
            .enumerate()
            .filter_map(|(position, count)| (*count > 0).then_some(tables[position].name))
            .collect();
        Err(Error::InvalidSchema(format!(
            "foreign key cycle between tables: {}",
            cycle.join(", ")
        )))
    }
}
