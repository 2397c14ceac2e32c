//! Simplicity test of polygon boundaries with the Shamos-Hoey sweep line algorithm.
//!
//! A boundary is simple if no two of its edges have a common point, except for the shared vertex of
//! two consecutive edges of the same ring. Rings are treated as closed whether or not the last
//! point repeats the first one, and repeated consecutive points are ignored. A ring with less than
//! three distinct vertices is never simple.

use std::cmp::Ordering;

use crate::point::Point;
use crate::polygon::Polygon;

use super::segment::Segment;

/// Returns true if the ring does not intersect itself.
pub fn is_simple_ring(points: &[Point]) -> bool {
    is_simple(&[points])
}

/// Returns true if none of the rings of the polygon intersect themselves or each other.
pub fn is_simple_polygon(polygon: &Polygon) -> bool {
    let rings: Vec<&[Point]> = polygon.rings().iter().map(|r| r.points()).collect();
    is_simple(&rings)
}

struct Edge<'a> {
    ring: usize,
    index: usize,
    ring_len: usize,
    left: &'a Point,
    right: &'a Point,
}

impl<'a> Edge<'a> {
    fn new(ring: usize, index: usize, ring_len: usize, a: &'a Point, b: &'a Point) -> Self {
        let (left, right) = if compare_points(a, b) == Ordering::Greater {
            (b, a)
        } else {
            (a, b)
        };
        Self {
            ring,
            index,
            ring_len,
            left,
            right,
        }
    }

    fn y_at(&self, x: f64) -> f64 {
        let dx = self.right.x() - self.left.x();
        if dx == 0.0 {
            return self.left.y();
        }

        self.left.y() + (x - self.left.x()) / dx * (self.right.y() - self.left.y())
    }

    fn slope(&self) -> f64 {
        let dx = self.right.x() - self.left.x();
        if dx == 0.0 {
            f64::INFINITY
        } else {
            (self.right.y() - self.left.y()) / dx
        }
    }

    fn is_adjacent(&self, other: &Edge) -> bool {
        if self.ring != other.ring {
            return false;
        }

        let diff = self.index.abs_diff(other.index);
        diff == 1 || diff == self.ring_len - 1
    }

    fn crosses(&self, other: &Edge) -> bool {
        !self.is_adjacent(other)
            && Segment(self.left, self.right).intersects(&Segment(other.left, other.right))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum EventType {
    Left,
    Right,
}

struct Event<'a> {
    point: &'a Point,
    event_type: EventType,
    edge: usize,
}

fn compare_points(a: &Point, b: &Point) -> Ordering {
    a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y()))
}

fn distinct_vertices(ring: &[Point]) -> Vec<&Point> {
    let mut vertices: Vec<&Point> = Vec::with_capacity(ring.len());
    for p in ring {
        if vertices.last().map_or(true, |last| compare_points(last, p) != Ordering::Equal) {
            vertices.push(p);
        }
    }

    while vertices.len() > 1
        && compare_points(vertices[0], vertices[vertices.len() - 1]) == Ordering::Equal
    {
        vertices.pop();
    }

    vertices
}

fn is_simple(rings: &[&[Point]]) -> bool {
    let mut edges = vec![];
    for (ring_index, ring) in rings.iter().enumerate() {
        let vertices = distinct_vertices(ring);
        if vertices.len() < 3 {
            return false;
        }

        let len = vertices.len();
        for i in 0..len {
            edges.push(Edge::new(ring_index, i, len, vertices[i], vertices[(i + 1) % len]));
        }
    }

    let mut events: Vec<Event> = edges
        .iter()
        .enumerate()
        .flat_map(|(id, edge)| {
            [
                Event {
                    point: edge.left,
                    event_type: EventType::Left,
                    edge: id,
                },
                Event {
                    point: edge.right,
                    event_type: EventType::Right,
                    edge: id,
                },
            ]
        })
        .collect();
    events.sort_by(|a, b| compare_points(a.point, b.point).then(a.event_type.cmp(&b.event_type)));

    let mut sweep: Vec<usize> = vec![];
    for event in &events {
        let edge = &edges[event.edge];
        match event.event_type {
            EventType::Left => {
                let x = event.point.x();
                let position = sweep.partition_point(|&other| {
                    let other = &edges[other];
                    other
                        .y_at(x)
                        .total_cmp(&edge.y_at(x))
                        .then(other.slope().total_cmp(&edge.slope()))
                        == Ordering::Less
                });

                let below = position.checked_sub(1).map(|i| sweep[i]);
                let above = sweep.get(position).copied();
                if [below, above]
                    .into_iter()
                    .flatten()
                    .any(|other| edges[other].crosses(edge))
                {
                    return false;
                }

                sweep.insert(position, event.edge);
            }
            EventType::Right => {
                let Some(position) = sweep.iter().position(|&id| id == event.edge) else {
                    continue;
                };

                let below = position.checked_sub(1).map(|i| sweep[i]);
                let above = sweep.get(position + 1).copied();
                if let (Some(below), Some(above)) = (below, above) {
                    if edges[below].crosses(&edges[above]) {
                        return false;
                    }
                }

                sweep.remove(position);
            }
        }
    }

    true
}
