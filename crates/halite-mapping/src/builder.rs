//! Model assembly and inversion linking.
//!
//! Every kinetic mapping needs a reverse partner so the simulation can walk
//! jumps in both directions. Most transition sets contain their own
//! reverses; sets that do not are paired with another transition's set, and
//! sets with no partner at all receive a synthesized mirror model.

use crate::error::MappingError;
use crate::mapping::KineticMapping;
use crate::transition::KineticTransition;

/// Address of a mapping's inverse inside a built model list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseLink {
    /// Index of the model holding the inverse mapping.
    pub model_index: usize,
    /// Index of the inverse mapping within that model.
    pub mapping_index: usize,
}

/// A mapping together with the link to its geometric inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticMappingModel {
    /// The concrete mapping.
    pub mapping: KineticMapping,
    /// Where the reverse jump lives; `None` only during linking.
    pub inverse: Option<InverseLink>,
}

/// All mappings of one transition, fully inversion-linked after building.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticTransitionModel {
    /// Index of the transition this model realizes.
    pub transition_index: usize,
    /// The mapping models in mapper order.
    pub mappings: Vec<KineticMappingModel>,
    /// Set on synthesized models: the model this one mirrors.
    pub mirror_of: Option<usize>,
}

impl KineticTransitionModel {
    /// Whether every mapping has found its inverse.
    pub fn is_fully_linked(&self) -> bool {
        self.mappings.iter().all(|m| m.inverse.is_some())
    }

    fn step_count(&self) -> Option<usize> {
        self.mappings.first().map(|m| m.mapping.step_count())
    }
}

/// Builds inversion-linked transition models.
pub struct KineticModelBuilder;

impl KineticModelBuilder {
    /// Map every transition and link all mappings to their inverses.
    ///
    /// Linking tries, in order: the transition's own mapping set (a set
    /// that contains its reverses links self-consistently), a combined set
    /// with another still-unlinked model of equal step count, and finally a
    /// synthesized mirror model holding the element-wise reversal of every
    /// mapping. Each attempt is transactional: a combined set that leaves
    /// any mapping unpaired is rolled back completely before the next
    /// strategy runs.
    pub fn build<M>(
        transitions: &[KineticTransition],
        mut map: M,
    ) -> Result<Vec<KineticTransitionModel>, MappingError>
    where
        M: FnMut(&KineticTransition) -> Result<Vec<KineticMapping>, MappingError>,
    {
        let mut models = Vec::with_capacity(transitions.len());
        for transition in transitions {
            let mappings = map(transition)?
                .into_iter()
                .map(|mapping| KineticMappingModel {
                    mapping,
                    inverse: None,
                })
                .collect();
            models.push(KineticTransitionModel {
                transition_index: transition.index,
                mappings,
                mirror_of: None,
            });
        }

        let original_count = models.len();
        for i in 0..original_count {
            if models[i].is_fully_linked() {
                continue;
            }
            if Self::try_link(&mut models, &[i]) {
                continue;
            }
            let steps = models[i].step_count();
            let mut paired = false;
            for j in (i + 1)..original_count {
                if models[j].is_fully_linked() || models[j].step_count() != steps {
                    continue;
                }
                if Self::try_link(&mut models, &[i, j]) {
                    paired = true;
                    break;
                }
            }
            if !paired {
                Self::synthesize_mirror(&mut models, i);
            }
        }
        Ok(models)
    }

    // Pair every unlinked mapping of the group with an unlinked inverse
    // from the group. All-or-nothing: on failure the group's links are
    // restored to their state before the call.
    fn try_link(models: &mut Vec<KineticTransitionModel>, group: &[usize]) -> bool {
        let backup: Vec<(usize, Vec<Option<InverseLink>>)> = group
            .iter()
            .map(|&m| (m, models[m].mappings.iter().map(|mm| mm.inverse).collect()))
            .collect();
        let mut success = true;
        'outer: for &mi in group {
            for idx in 0..models[mi].mappings.len() {
                if models[mi].mappings[idx].inverse.is_some() {
                    continue;
                }
                match Self::find_partner(models, group, mi, idx) {
                    Some((mj, jdx)) => {
                        models[mi].mappings[idx].inverse = Some(InverseLink {
                            model_index: mj,
                            mapping_index: jdx,
                        });
                        models[mj].mappings[jdx].inverse = Some(InverseLink {
                            model_index: mi,
                            mapping_index: idx,
                        });
                    }
                    None => {
                        success = false;
                        break 'outer;
                    }
                }
            }
        }
        if !success {
            for (m, links) in backup {
                for (k, link) in links.into_iter().enumerate() {
                    models[m].mappings[k].inverse = link;
                }
            }
        }
        success
    }

    fn find_partner(
        models: &[KineticTransitionModel],
        group: &[usize],
        mi: usize,
        idx: usize,
    ) -> Option<(usize, usize)> {
        let candidate = &models[mi].mappings[idx].mapping;
        for &mj in group {
            for (jdx, other) in models[mj].mappings.iter().enumerate() {
                if (mj, jdx) == (mi, idx) {
                    // A loop jump (equal endpoints) is its own inverse.
                    if candidate.is_geometric_inversion_of(candidate) {
                        return Some((mj, jdx));
                    }
                    continue;
                }
                if other.inverse.is_none()
                    && candidate.is_geometric_inversion_of(&other.mapping)
                {
                    return Some((mj, jdx));
                }
            }
        }
        None
    }

    // Append a model holding the reversal of every mapping of `source`,
    // linked pairwise to the source.
    fn synthesize_mirror(models: &mut Vec<KineticTransitionModel>, source: usize) {
        let mirror_index = models.len();
        let mirrored: Vec<KineticMappingModel> = models[source]
            .mappings
            .iter()
            .enumerate()
            .map(|(k, m)| KineticMappingModel {
                mapping: m.mapping.reversed(),
                inverse: Some(InverseLink {
                    model_index: source,
                    mapping_index: k,
                }),
            })
            .collect();
        for (k, m) in models[source].mappings.iter_mut().enumerate() {
            m.inverse = Some(InverseLink {
                model_index: mirror_index,
                mapping_index: k,
            });
        }
        models.push(KineticTransitionModel {
            transition_index: models[source].transition_index,
            mappings: mirrored,
            mirror_of: Some(source),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinetic::KineticTransitionMapper;
    use halite_core::Fractional3D;
    use halite_encode::LatticeVector4D;
    use halite_test_utils::{
        cesium_chloride_encoder, cubic_point_group, simple_cubic_encoder, test_comparer,
        TableSpaceGroup,
    };
    use smallvec::smallvec;

    fn transition(index: usize, path: &[(f64, f64, f64)]) -> KineticTransition {
        KineticTransition::new(
            index,
            path.iter()
                .map(|&(a, b, c)| Fractional3D::new(a, b, c))
                .collect(),
        )
        .unwrap()
    }

    fn hand_mapping(index: usize, path4: &[(i32, i32, i32, i32)]) -> KineticMapping {
        KineticMapping {
            transition_index: index,
            encoded_path: path4
                .iter()
                .map(|&(a, b, c, p)| LatticeVector4D::new(a, b, c, p))
                .collect(),
            fractional_path: smallvec![Fractional3D::zero(); path4.len()],
        }
    }

    #[test]
    fn symmetric_set_links_self_consistently() {
        let encoder = simple_cubic_encoder(4.0);
        let group = TableSpaceGroup::new(cubic_point_group(), test_comparer());
        let mapper = KineticTransitionMapper::new(&group, &encoder);
        let transitions = [transition(0, &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)])];
        let models =
            KineticModelBuilder::build(&transitions, |t| mapper.map(t)).unwrap();
        assert_eq!(models.len(), 1);
        assert!(models[0].is_fully_linked());
        assert!(models[0].mirror_of.is_none());
        // Every link is mutual and stays inside the model.
        for (k, m) in models[0].mappings.iter().enumerate() {
            let link = m.inverse.unwrap();
            assert_eq!(link.model_index, 0);
            let partner = &models[0].mappings[link.mapping_index];
            assert_eq!(
                partner.inverse,
                Some(InverseLink {
                    model_index: 0,
                    mapping_index: k
                })
            );
            assert!(m.mapping.is_geometric_inversion_of(&partner.mapping));
        }
    }

    #[test]
    fn forward_and_reverse_transitions_pair_up() {
        let encoder = cesium_chloride_encoder(4.0);
        let group = TableSpaceGroup::new(cubic_point_group(), test_comparer());
        let mapper = KineticTransitionMapper::new(&group, &encoder);
        let transitions = [
            transition(0, &[(0.0, 0.0, 0.0), (0.5, 0.5, 0.5)]),
            transition(1, &[(0.5, 0.5, 0.5), (1.0, 1.0, 1.0)]),
        ];
        let models =
            KineticModelBuilder::build(&transitions, |t| mapper.map(t)).unwrap();
        assert_eq!(models.len(), 2);
        for model in &models {
            assert!(model.is_fully_linked());
            assert!(model.mirror_of.is_none());
        }
        for m in &models[0].mappings {
            let link = m.inverse.unwrap();
            assert_eq!(link.model_index, 1);
            let partner = &models[1].mappings[link.mapping_index];
            assert!(m.mapping.is_geometric_inversion_of(&partner.mapping));
        }
    }

    #[test]
    fn unpaired_transition_receives_a_mirror_model() {
        let encoder = cesium_chloride_encoder(4.0);
        let group = TableSpaceGroup::new(cubic_point_group(), test_comparer());
        let mapper = KineticTransitionMapper::new(&group, &encoder);
        // Corner-to-center jumps only; the reverse direction starts on the
        // other sublattice and is not in the set.
        let transitions = [transition(0, &[(0.0, 0.0, 0.0), (0.5, 0.5, 0.5)])];
        let models =
            KineticModelBuilder::build(&transitions, |t| mapper.map(t)).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].mirror_of, Some(0));
        assert_eq!(models[1].transition_index, 0);
        assert_eq!(models[0].mappings.len(), models[1].mappings.len());
        for (k, m) in models[0].mappings.iter().enumerate() {
            let mirror = &models[1].mappings[k];
            assert_eq!(mirror.mapping, m.mapping.reversed());
            assert_eq!(
                m.inverse,
                Some(InverseLink {
                    model_index: 1,
                    mapping_index: k
                })
            );
            assert_eq!(
                mirror.inverse,
                Some(InverseLink {
                    model_index: 0,
                    mapping_index: k
                })
            );
        }
    }

    #[test]
    fn failed_pairing_rolls_back_before_mirroring() {
        // Model 0 holds a lone +x jump; model 1 holds its -x inverse plus
        // an unrelated +y jump. The combined set links +x with -x, leaves
        // +y unpaired, and must then roll the tentative link back so both
        // models end up mirrored instead of half-linked.
        let sets = [
            vec![hand_mapping(0, &[(0, 0, 0, 0), (1, 0, 0, 0)])],
            vec![
                hand_mapping(1, &[(0, 0, 0, 0), (-1, 0, 0, 0)]),
                hand_mapping(1, &[(0, 0, 0, 0), (0, 1, 0, 0)]),
            ],
        ];
        let transitions = [
            transition(0, &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]),
            transition(1, &[(0.0, 0.0, 0.0), (-1.0, 0.0, 0.0)]),
        ];
        let models = KineticModelBuilder::build(&transitions, |t| {
            Ok(sets[t.index].clone())
        })
        .unwrap();
        assert_eq!(models.len(), 4);
        assert_eq!(models[2].mirror_of, Some(0));
        assert_eq!(models[3].mirror_of, Some(1));
        // The tentative +x/-x cross link must not survive the rollback.
        assert_eq!(
            models[0].mappings[0].inverse,
            Some(InverseLink {
                model_index: 2,
                mapping_index: 0
            })
        );
        assert_eq!(
            models[1].mappings[0].inverse,
            Some(InverseLink {
                model_index: 3,
                mapping_index: 0
            })
        );
        assert_eq!(
            models[1].mappings[1].inverse,
            Some(InverseLink {
                model_index: 3,
                mapping_index: 1
            })
        );
    }

    #[test]
    fn loop_jump_links_to_itself() {
        let sets = [vec![hand_mapping(0, &[(0, 0, 0, 0), (1, 0, 0, 0), (0, 0, 0, 0)])]];
        let transitions = [transition(
            0,
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 0.0, 0.0)],
        )];
        let models = KineticModelBuilder::build(&transitions, |t| {
            Ok(sets[t.index].clone())
        })
        .unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(
            models[0].mappings[0].inverse,
            Some(InverseLink {
                model_index: 0,
                mapping_index: 0
            })
        );
    }

    #[test]
    fn mapper_errors_abort_the_build() {
        let transitions = [transition(0, &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)])];
        let result = KineticModelBuilder::build(&transitions, |_| {
            Err(MappingError::LatticeMismatch {
                position: Fractional3D::zero(),
            })
        });
        assert!(matches!(
            result,
            Err(MappingError::LatticeMismatch { .. })
        ));
    }
}
