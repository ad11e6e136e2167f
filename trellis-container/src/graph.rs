//! Dependency graph validation.
//!
//! Checks the dependencies components *declare* (through `depends_on` or a
//! view constructor) when the container is built:
//! - every declared dependency is served locally or by the base
//! - declared dependencies contain no cycle
//!
//! Dependencies a constructor only requests at runtime are not visible
//! here; those are checked by the in-flight chain during resolution.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, trace, warn};
use trellis_support::rendering::suggest_similar;

use crate::error::{DependencyCycleError, NotRegisteredError, TrellisError};
use crate::key::DependencyKey;

/// Declared edges of one interface.
#[derive(Debug, Clone)]
pub(crate) struct DependencyInfo {
    /// The interface
    pub key: DependencyKey,
    /// Component type serving it
    pub component: &'static str,
    /// What the component declared it needs
    pub dependencies: Vec<DependencyKey>,
}

/// Depth-first validator over declared dependencies.
///
/// Keeps a "visiting" set and the current path: meeting a key that is
/// still being visited closes a cycle.
pub(crate) struct GraphValidator {
    order: Vec<DependencyKey>,
    dependencies: HashMap<DependencyKey, DependencyInfo>,
    /// Keys served by the base container; treated as valid leaves.
    inherited: HashSet<DependencyKey>,
    /// A missing-dependency handler may serve any unknown key.
    fallbacks: bool,
    visiting: HashSet<DependencyKey>,
    validated: HashSet<DependencyKey>,
    path: Vec<DependencyKey>,
}

impl GraphValidator {
    pub fn new(infos: Vec<DependencyInfo>, inherited: HashSet<DependencyKey>) -> Self {
        let order = infos.iter().map(|info| info.key).collect();
        let dependencies = infos.into_iter().map(|info| (info.key, info)).collect();

        Self {
            order,
            dependencies,
            inherited,
            fallbacks: false,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Treats unknown keys as leaves, for containers whose
    /// missing-dependency policy produces fallbacks.
    pub fn fallbacks_may_serve(mut self, fallbacks: bool) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Validates every registered interface, in declaration order.
    ///
    /// # Errors
    /// - [`TrellisError::DependencyCycle`]: declared dependencies loop
    /// - [`TrellisError::NotRegistered`]: a declared dependency nobody serves
    #[instrument(skip(self), name = "graph_validation")]
    pub fn validate(&mut self) -> Result<(), TrellisError> {
        debug!(
            interfaces = self.order.len(),
            inherited = self.inherited.len(),
            "Validating dependency graph"
        );

        for key in self.order.clone() {
            self.validate_key(&key)?;
        }

        debug!("Dependency graph is valid");
        Ok(())
    }

    fn validate_key(&mut self, key: &DependencyKey) -> Result<(), TrellisError> {
        if self.validated.contains(key) {
            return Ok(());
        }

        if self.visiting.contains(key) {
            let start = self.path.iter().position(|k| k == key).unwrap_or(0);
            let mut chain = self.path[start..].to_vec();
            chain.push(*key);

            warn!(cycle = ?chain, "Declared dependency cycle");
            return Err(TrellisError::DependencyCycle(DependencyCycleError { chain }));
        }

        let Some(info) = self.dependencies.get(key).cloned() else {
            if self.inherited.contains(key) {
                self.validated.insert(*key);
                return Ok(());
            }

            if self.fallbacks {
                trace!(key = %key, "Left to the missing-dependency handler");
                self.validated.insert(*key);
                return Ok(());
            }

            return Err(TrellisError::NotRegistered(NotRegisteredError {
                requested: *key,
                required_by: self.path.last().copied(),
                suggestions: self.similar_keys(key),
            }));
        };

        trace!(key = %key, component = info.component, "Visiting");
        self.visiting.insert(*key);
        self.path.push(*key);

        for dependency in &info.dependencies {
            self.validate_key(dependency)?;
        }

        self.path.pop();
        self.visiting.remove(key);
        self.validated.insert(*key);
        Ok(())
    }

    fn similar_keys(&self, target: &DependencyKey) -> Vec<String> {
        let mut names: Vec<&str> = self
            .dependencies
            .keys()
            .chain(self.inherited.iter())
            .map(|k| k.type_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        suggest_similar(target.type_name(), &names, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(key: DependencyKey, deps: Vec<DependencyKey>) -> DependencyInfo {
        DependencyInfo {
            key,
            component: key.type_name(),
            dependencies: deps,
        }
    }

    fn validate(infos: Vec<DependencyInfo>) -> Result<(), TrellisError> {
        GraphValidator::new(infos, HashSet::new()).validate()
    }

    struct Database;
    struct UserRepo;
    struct UserService;

    #[test]
    fn valid_simple_graph() {
        let result = validate(vec![
            info(DependencyKey::of::<Database>(), vec![]),
            info(DependencyKey::of::<UserRepo>(), vec![DependencyKey::of::<Database>()]),
            info(DependencyKey::of::<UserService>(), vec![DependencyKey::of::<UserRepo>()]),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn detect_three_way_cycle() {
        struct A;
        struct B;
        struct C;

        let result = validate(vec![
            info(DependencyKey::of::<A>(), vec![DependencyKey::of::<B>()]),
            info(DependencyKey::of::<B>(), vec![DependencyKey::of::<C>()]),
            info(DependencyKey::of::<C>(), vec![DependencyKey::of::<A>()]),
        ]);

        match result.unwrap_err() {
            TrellisError::DependencyCycle(err) => {
                assert_eq!(
                    err.chain,
                    vec![
                        DependencyKey::of::<A>(),
                        DependencyKey::of::<B>(),
                        DependencyKey::of::<C>(),
                        DependencyKey::of::<A>(),
                    ]
                );
            }
            other => panic!("Expected DependencyCycle, got: {other:?}"),
        }
    }

    #[test]
    fn detect_self_dependency() {
        struct A;
        let result = validate(vec![info(DependencyKey::of::<A>(), vec![DependencyKey::of::<A>()])]);
        assert!(matches!(result, Err(TrellisError::DependencyCycle(_))));
    }

    #[test]
    fn detect_missing_dependency() {
        struct A;
        struct B;

        match validate(vec![info(DependencyKey::of::<A>(), vec![DependencyKey::of::<B>()])]).unwrap_err() {
            TrellisError::NotRegistered(err) => {
                assert_eq!(err.requested, DependencyKey::of::<B>());
                assert_eq!(err.required_by, Some(DependencyKey::of::<A>()));
            }
            other => panic!("Expected NotRegistered, got: {other:?}"),
        }
    }

    #[test]
    fn inherited_keys_satisfy_dependencies() {
        let inherited: HashSet<_> = [DependencyKey::of::<Database>()].into_iter().collect();
        let mut validator = GraphValidator::new(
            vec![info(DependencyKey::of::<UserRepo>(), vec![DependencyKey::of::<Database>()])],
            inherited,
        );
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn unknown_keys_pass_when_fallbacks_may_serve() {
        let infos = vec![info(DependencyKey::of::<UserRepo>(), vec![DependencyKey::of::<Database>()])];

        assert!(validate(infos.clone()).is_err());

        let mut validator = GraphValidator::new(infos, HashSet::new()).fallbacks_may_serve(true);
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn fallbacks_do_not_hide_cycles() {
        let mut validator = GraphValidator::new(
            vec![
                info(DependencyKey::of::<UserRepo>(), vec![DependencyKey::of::<UserService>()]),
                info(DependencyKey::of::<UserService>(), vec![DependencyKey::of::<UserRepo>()]),
            ],
            HashSet::new(),
        )
        .fallbacks_may_serve(true);

        assert!(matches!(validator.validate(), Err(TrellisError::DependencyCycle(_))));
    }

    struct Store;
    struct StoreA;
    struct StoreB;

    #[test]
    fn suggestions_come_out_in_name_order() {
        let result = validate(vec![
            info(DependencyKey::of::<StoreB>(), vec![DependencyKey::of::<Store>()]),
            info(DependencyKey::of::<StoreA>(), vec![]),
        ]);

        match result.unwrap_err() {
            TrellisError::NotRegistered(err) => {
                assert_eq!(err.requested, DependencyKey::of::<Store>());
                assert_eq!(
                    err.suggestions,
                    vec![
                        std::any::type_name::<StoreA>().to_string(),
                        std::any::type_name::<StoreB>().to_string(),
                    ]
                );
            }
            other => panic!("Expected NotRegistered, got: {other:?}"),
        }
    }

    #[test]
    fn diamond_dependency_ok() {
        //     A
        //    / \
        //   B   C
        //    \ /
        //     D
        struct A;
        struct B;
        struct C;
        struct D;

        let result = validate(vec![
            info(DependencyKey::of::<D>(), vec![]),
            info(DependencyKey::of::<B>(), vec![DependencyKey::of::<D>()]),
            info(DependencyKey::of::<C>(), vec![DependencyKey::of::<D>()]),
            info(
                DependencyKey::of::<A>(),
                vec![DependencyKey::of::<B>(), DependencyKey::of::<C>()],
            ),
        ]);
        assert!(result.is_ok());
    }
}
