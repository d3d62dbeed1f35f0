//! Arena-backed transform hierarchy.
//!
//! Transforms are owned by the graph and addressed through stable
//! [`TransformId`]s, so parent links can never dangle. Nodes are never
//! removed; a freed scene drops the whole graph at once.

use glam::Vec2;
use lumen_algebra::Mat3;
use thiserror::Error;

use crate::transform2d::Transform2D;

/// Stable handle to a transform stored in a [`TransformGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(u32);

/// Error type for transform graph lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not belong to this graph.
    #[error("transform id {0} is not part of this graph")]
    UnknownTransform(u32),
}

struct Node {
    transform: Transform2D,
    parent: Option<TransformId>,
}

/// Owner of a set of 2D transforms and their parent links.
///
/// World-space resolution walks parent chains recursively. The graph does
/// not detect cycles; re-parenting a transform onto one of its own
/// descendants makes world-space queries recurse without bound.
#[derive(Default)]
pub struct TransformGraph {
    nodes: Vec<Node>,
}

impl TransformGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transforms in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no transforms.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a root transform and return its id.
    pub fn insert(&mut self, transform: Transform2D) -> TransformId {
        let id = TransformId(self.nodes.len() as u32);
        self.nodes.push(Node {
            transform,
            parent: None,
        });
        id
    }

    /// Insert a transform parented to `parent` and return its id.
    pub fn insert_child(
        &mut self,
        transform: Transform2D,
        parent: TransformId,
    ) -> Result<TransformId, SceneError> {
        self.node(parent)?;
        let id = self.insert(transform);
        self.nodes[id.0 as usize].parent = Some(parent);
        Ok(id)
    }

    /// Re-parent `child`, or detach it when `parent` is `None`.
    pub fn set_parent(
        &mut self,
        child: TransformId,
        parent: Option<TransformId>,
    ) -> Result<(), SceneError> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        self.node(child)?;
        self.nodes[child.0 as usize].parent = parent;
        Ok(())
    }

    /// Parent of `id`, if any.
    pub fn parent(&self, id: TransformId) -> Result<Option<TransformId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Shared access to a transform.
    pub fn get(&self, id: TransformId) -> Result<&Transform2D, SceneError> {
        Ok(&self.node(id)?.transform)
    }

    /// Mutable access to a transform.
    pub fn get_mut(&mut self, id: TransformId) -> Result<&mut Transform2D, SceneError> {
        let index = id.0 as usize;
        match self.nodes.get_mut(index) {
            Some(node) => Ok(&mut node.transform),
            None => Err(SceneError::UnknownTransform(id.0)),
        }
    }

    /// World matrix of `id`: the parent chain's matrices multiplied down
    /// to the local matrix.
    pub fn world_matrix(&self, id: TransformId) -> Result<Mat3, SceneError> {
        let node = self.node(id)?;
        let local = node.transform.local_matrix();
        match node.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * local),
            None => Ok(local),
        }
    }

    /// Transform a point into world space, applying the full parent chain.
    pub fn transform_point(&self, id: TransformId, point: Vec2) -> Result<Vec2, SceneError> {
        let m = self.world_matrix(id)?;
        Ok(Vec2::new(
            m.m00 * point.x + m.m01 * point.y + m.m02,
            m.m10 * point.x + m.m11 * point.y + m.m12,
        ))
    }

    /// Transform a vector into world space, ignoring translation.
    pub fn transform_vector(&self, id: TransformId, vector: Vec2) -> Result<Vec2, SceneError> {
        let m = self.world_matrix(id)?;
        Ok(Vec2::new(
            m.m00 * vector.x + m.m01 * vector.y,
            m.m10 * vector.x + m.m11 * vector.y,
        ))
    }

    /// Inverse of the world transform of `id`, as a composition of the
    /// local inverse with the parent's inverse.
    ///
    /// This is a product of per-node analytic inverses rather than an
    /// inversion of the full world matrix. The two differ once non-uniform
    /// scale mixes with rotation across levels, because each per-node
    /// inverse is flattened back into TRS form before composing.
    pub fn inverse(&self, id: TransformId) -> Result<Transform2D, SceneError> {
        let node = self.node(id)?;
        let local_inverse = node.transform.inverse();
        match node.parent {
            Some(parent) => Ok(local_inverse * self.inverse(parent)?),
            None => Ok(local_inverse),
        }
    }

    fn node(&self, id: TransformId) -> Result<&Node, SceneError> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(SceneError::UnknownTransform(id.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = TransformGraph::new();
        assert!(graph.is_empty());

        let id = graph.insert(Transform2D::from_translation(Vec2::new(1.0, 2.0)));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(id).unwrap().position(), Vec2::new(1.0, 2.0));
        assert_eq!(graph.parent(id).unwrap(), None);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let graph = TransformGraph::new();
        let bogus = TransformId(7);
        assert!(matches!(
            graph.get(bogus),
            Err(SceneError::UnknownTransform(7))
        ));
        assert!(matches!(
            graph.world_matrix(bogus),
            Err(SceneError::UnknownTransform(7))
        ));
    }

    #[test]
    fn test_child_inherits_parent_transform() {
        // Parent translates by (1,0) after scaling by 2; the child
        // translates by (1,0) in parent space. The child origin lands at
        // parent * (1,0) = (3,0).
        let mut graph = TransformGraph::new();
        let parent_transform = Transform2D::from_translation(Vec2::new(1.0, 0.0))
            .compose(&Transform2D::from_scale(Vec2::new(2.0, 2.0)));
        let parent = graph.insert(parent_transform);
        let child = graph
            .insert_child(Transform2D::from_translation(Vec2::new(1.0, 0.0)), parent)
            .unwrap();

        let p = graph.transform_point(child, Vec2::ZERO).unwrap();
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_grandparent_chain() {
        let mut graph = TransformGraph::new();
        let a = graph.insert(Transform2D::from_translation(Vec2::new(1.0, 0.0)));
        let b = graph
            .insert_child(Transform2D::from_translation(Vec2::new(0.0, 2.0)), a)
            .unwrap();
        let c = graph
            .insert_child(Transform2D::from_rotation_deg(90.0), b)
            .unwrap();

        let p = graph.transform_point(c, Vec2::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let mut graph = TransformGraph::new();
        let parent = graph.insert(Transform2D::from_translation(Vec2::new(10.0, 10.0)));
        let child = graph
            .insert_child(Transform2D::from_scale_uniform(3.0), parent)
            .unwrap();

        let v = graph.transform_vector(child, Vec2::X).unwrap();
        assert_relative_eq!(v.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_parent_and_detach() {
        let mut graph = TransformGraph::new();
        let a = graph.insert(Transform2D::from_translation(Vec2::new(5.0, 0.0)));
        let b = graph.insert(Transform2D::identity());

        graph.set_parent(b, Some(a)).unwrap();
        assert_eq!(graph.parent(b).unwrap(), Some(a));
        let p = graph.transform_point(b, Vec2::ZERO).unwrap();
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);

        graph.set_parent(b, None).unwrap();
        let p = graph.transform_point(b, Vec2::ZERO).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mutation_through_graph_updates_world() {
        let mut graph = TransformGraph::new();
        let parent = graph.insert(Transform2D::identity());
        let child = graph
            .insert_child(Transform2D::from_translation(Vec2::new(1.0, 0.0)), parent)
            .unwrap();

        graph
            .get_mut(parent)
            .unwrap()
            .set_position(Vec2::new(0.0, 4.0));

        let p = graph.transform_point(child, Vec2::ZERO).unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_with_parent_undoes_rigid_motion() {
        // Rigid motions (rotation + translation) invert exactly through
        // the per-node composition.
        let mut graph = TransformGraph::new();
        let parent = graph.insert(Transform2D::from_translation(Vec2::new(2.0, -1.0)));
        let child = graph
            .insert_child(Transform2D::from_rotation_deg(30.0), parent)
            .unwrap();

        let inverse = graph.inverse(child).unwrap();
        let p = Vec2::new(0.7, 1.3);
        let world = graph.transform_point(child, p).unwrap();
        let back = inverse.transform_point(world);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
    }

    #[test]
    fn test_insert_child_with_unknown_parent() {
        let mut graph = TransformGraph::new();
        let result = graph.insert_child(Transform2D::identity(), TransformId(3));
        assert_eq!(result.unwrap_err(), SceneError::UnknownTransform(3));
        assert!(graph.is_empty());
    }
}
