//! Boolean operations on sets of polygons.
//!
//! Both operands are treated as the union of their polygons, each polygon
//! filled with the even-odd rule. The result is computed on the planar
//! arrangement of all input edges:
//!
//! 1. Edges are split at their crossings and at every vertex lying on them,
//!    repeatedly, until no two pieces cross. Coincident pieces collapse into
//!    one edge that remembers which input rings run along it.
//! 2. The faces of the arrangement are traced. The unbounded face of each
//!    connected part is located against the input rings, and every other
//!    face inherits the parity of its neighbour, flipped for each ring
//!    running along the shared edge. No point is ever sampled near an edge,
//!    so nearly coincident edges classify the same as distant ones.
//! 3. Edges with the result on exactly one side are directed so that the
//!    result lies on their left, and linked into closed loops, always taking
//!    the tightest clockwise turn. Loops touching at a vertex therefore come
//!    out as separate rings.
//! 4. Counter-clockwise loops become outer boundaries and clockwise loops
//!    become holes of the smallest boundary enclosing them.
//!
//! Touching operands produce no output, zero-area input contributes nothing,
//! and no input makes the computation fail.
use claims::debug_assert_ok;
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use crate::data::polygon::{ring_contains, ring_signed_area};
use crate::data::{ILineSegment, LineSegment, Point, Polygon};
use crate::{Intersects, Orientation};

// Vertices closer than this (relative to the input extent) are merged.
const SNAP: f64 = 1e-10;
// Snapped crossings can create new crossings. Give up after this many rounds.
const REFINE_ROUNDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperation {
  And,
  Or,
  Not,
  Xor,
}

impl BooleanOperation {
  /// $O(n^4)$ in the total number of input edges.
  pub fn apply(self, subject: &[Polygon], clip: &[Polygon]) -> Vec<Polygon> {
    let rings: Vec<&[Point<f64, 2>]> = subject
      .iter()
      .chain(clip)
      .flat_map(Polygon::rings)
      .map(Vec::as_slice)
      .collect();
    let split: usize = subject.iter().map(|poly| poly.rings().len()).sum();
    let graph = Arrangement::build(&rings);
    graph.extract(&rings, |parity| {
      let (in_subject, in_clip) = parity.split_at(split);
      self.select(covers(subject, in_subject), covers(clip, in_clip))
    })
  }

  fn select(self, in_subject: bool, in_clip: bool) -> bool {
    match self {
      BooleanOperation::And => in_subject && in_clip,
      BooleanOperation::Or => in_subject || in_clip,
      BooleanOperation::Not => in_subject && !in_clip,
      BooleanOperation::Xor => in_subject != in_clip,
    }
  }
}

/// Region covered by both `subject` and `clip`.
///
/// # Examples
///
/// ```rust
/// # use layerclip::algorithms::intersection;
/// # use layerclip::data::{Point, Polygon};
/// let a = Polygon::new(vec![
///   Point::new([0.0, 0.0]),
///   Point::new([2.0, 0.0]),
///   Point::new([2.0, 2.0]),
///   Point::new([0.0, 2.0]),
/// ])?;
/// let b = Polygon::new(vec![
///   Point::new([1.0, 1.0]),
///   Point::new([3.0, 1.0]),
///   Point::new([3.0, 3.0]),
///   Point::new([1.0, 3.0]),
/// ])?;
/// let overlap = intersection(&[a], &[b]);
/// assert_eq!(overlap.len(), 1);
/// assert_eq!(overlap[0].area(), 1.0);
/// # Ok::<(), layerclip::Error>(())
/// ```
pub fn intersection(subject: &[Polygon], clip: &[Polygon]) -> Vec<Polygon> {
  BooleanOperation::And.apply(subject, clip)
}

// `parity` holds one flag per ring of `set`, in order. A polygon covers a
// face if an odd number of its rings enclose it.
fn covers(set: &[Polygon], parity: &[bool]) -> bool {
  let mut parity = parity.iter().copied();
  set.iter().any(|poly| {
    poly
      .rings()
      .iter()
      .fold(false, |inside, _| inside ^ parity.next().unwrap_or(false))
  })
}

fn ring_edges(ring: &[Point<f64, 2>]) -> impl Iterator<Item = LineSegment> + '_ {
  ring
    .iter()
    .zip(ring.iter().cycle().skip(1))
    .map(|(a, b)| LineSegment::new(*a, *b))
}

// Half-edge `2k` runs along edge `k` from its smaller vertex and `2k + 1`
// runs back, so `h ^ 1` is the twin of `h`.
fn half_edge(keys: &[(usize, usize)], h: usize) -> (usize, usize) {
  let (a, b) = keys[h / 2];
  if h % 2 == 0 {
    (a, b)
  } else {
    (b, a)
  }
}

struct Arrangement {
  vertices: Vec<Point<f64, 2>>,
  // Undirected, smaller vertex index first. Maps to the input rings running
  // along the edge an odd number of times, never empty.
  edges: BTreeMap<(usize, usize), BTreeSet<usize>>,
  tolerance: f64,
}

impl Arrangement {
  fn build(rings: &[&[Point<f64, 2>]]) -> Arrangement {
    let segments: Vec<(usize, LineSegment)> = rings
      .iter()
      .enumerate()
      .flat_map(|(id, ring)| ring_edges(ring).map(move |seg| (id, seg)))
      .filter(|(_, seg)| seg.src.is_finite() && seg.dst.is_finite() && !seg.is_degenerate())
      .collect();
    let extent = segments
      .iter()
      .flat_map(|(_, seg)| seg.src.array.into_iter().chain(seg.dst.array))
      .fold(1.0_f64, |acc, c| acc.max(c.abs()));

    let mut graph = Arrangement {
      vertices: Vec::new(),
      edges: BTreeMap::new(),
      tolerance: extent * SNAP,
    };
    for (id, seg) in &segments {
      let src = graph.insert(seg.src);
      let dst = graph.insert(seg.dst);
      graph.toggle(src, dst, &BTreeSet::from([*id]));
    }
    for _ in 0..REFINE_ROUNDS {
      if !graph.refine() {
        break;
      }
    }
    graph
  }

  fn insert(&mut self, pt: Point<f64, 2>) -> usize {
    let limit = self.tolerance * self.tolerance;
    match self
      .vertices
      .iter()
      .position(|v| v.squared_euclidean_distance(&pt) <= limit)
    {
      Some(idx) => idx,
      None => {
        self.vertices.push(pt);
        self.vertices.len() - 1
      }
    }
  }

  fn segment(&self, a: usize, b: usize) -> LineSegment {
    LineSegment::new(self.vertices[a], self.vertices[b])
  }

  // Rings running along an edge twice cancel out.
  fn toggle(&mut self, a: usize, b: usize, rings: &BTreeSet<usize>) {
    if a == b {
      return;
    }
    let key = (a.min(b), a.max(b));
    let merged = match self.edges.remove(&key) {
      Some(existing) => &existing ^ rings,
      None => rings.clone(),
    };
    if !merged.is_empty() {
      self.edges.insert(key, merged);
    }
  }

  // Add the crossings between the current edges, then split every edge at the
  // vertices lying on it. Returns `false` once neither step changes anything.
  fn refine(&mut self) -> bool {
    let known = self.vertices.len();
    let pieces: Vec<LineSegment> = self
      .edges
      .keys()
      .map(|&(a, b)| self.segment(a, b))
      .collect();
    for (i, a) in pieces.iter().enumerate() {
      for b in &pieces[i + 1..] {
        if let Some(ILineSegment::Crossing(pt)) = a.intersect(b) {
          self.insert(pt);
        }
      }
    }

    let mut split = false;
    for ((a, b), rings) in std::mem::take(&mut self.edges) {
      let stops = self.stops(a, b);
      split |= stops.len() > 2;
      for pair in stops.windows(2) {
        self.toggle(pair[0], pair[1], &rings);
      }
    }
    split || self.vertices.len() > known
  }

  // Vertices on the edge from `a` to `b` in order, starting at `a` and ending
  // at `b`. A snapped crossing may sit up to twice the tolerance away from
  // the edges that produced it. Vertices beyond either end are not stops,
  // however close.
  fn stops(&self, a: usize, b: usize) -> Vec<usize> {
    let seg = self.segment(a, b);
    let limit = 4.0 * self.tolerance * self.tolerance;
    let mut inner: Vec<(OrderedFloat<f64>, usize)> = self
      .vertices
      .iter()
      .enumerate()
      .filter(|&(idx, _)| idx != a && idx != b)
      .map(|(idx, v)| (seg.parameter(v), idx, v))
      .filter(|&(t, _, v)| 0.0 < t && t < 1.0 && seg.squared_distance_to(v) <= limit)
      .map(|(t, idx, _)| (OrderedFloat(t), idx))
      .collect();
    inner.sort();
    std::iter::once(a)
      .chain(inner.into_iter().map(|(_, idx)| idx))
      .chain(std::iter::once(b))
      .collect()
  }

  fn extract<F>(&self, rings: &[&[Point<f64, 2>]], select: F) -> Vec<Polygon>
  where
    F: Fn(&[bool]) -> bool,
  {
    let keys: Vec<(usize, usize)> = self.edges.keys().copied().collect();
    let along: Vec<&BTreeSet<usize>> = self.edges.values().collect();
    let (face, cycles) = self.faces(&keys);
    let inside: Vec<bool> = self
      .parity(&keys, &along, &face, &cycles, rings)
      .iter()
      .map(|parity| select(parity.as_slice()))
      .collect();
    let directed: Vec<(usize, usize)> = (0..face.len())
      .filter(|&h| inside[face[h]] && !inside[face[h ^ 1]])
      .map(|h| half_edge(&keys, h))
      .collect();
    assemble(self.trace(&directed))
  }

  // Half-edge cycles taking the tightest clockwise turn at every vertex. Each
  // cycle bounds the face on its left. Returns the face of every half-edge
  // along with the cycles.
  fn faces(&self, keys: &[(usize, usize)]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let count = 2 * keys.len();
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];
    for h in 0..count {
      outgoing[half_edge(keys, h).0].push(h);
    }

    let mut face = vec![None; count];
    let mut cycles = Vec::new();
    for start in 0..count {
      if face[start].is_some() {
        continue;
      }
      let mut cycle = Vec::new();
      let mut h = start;
      while face[h].is_none() {
        face[h] = Some(cycles.len());
        cycle.push(h);
        let (src, dst) = half_edge(keys, h);
        h = outgoing[dst]
          .iter()
          .copied()
          .min_by_key(|&next| OrderedFloat(self.clockwise_turn(src, dst, half_edge(keys, next).1)))
          .unwrap_or(h ^ 1);
      }
      cycles.push(cycle);
    }
    // Every half-edge now lies on exactly one cycle.
    (face.into_iter().flatten().collect(), cycles)
  }

  // Even-odd parity of every input ring on every face. The unbounded face of
  // each connected part is located against the rings directly; any other
  // face flips its neighbour's parity for the rings along the shared edge.
  fn parity(
    &self,
    keys: &[(usize, usize)],
    along: &[&BTreeSet<usize>],
    face: &[usize],
    cycles: &[Vec<usize>],
    rings: &[&[Point<f64, 2>]],
  ) -> Vec<Vec<bool>> {
    let mut parity: Vec<Option<Vec<bool>>> = vec![None; cycles.len()];
    let mut seen = vec![false; cycles.len()];
    for first in 0..cycles.len() {
      if seen[first] {
        continue;
      }
      seen[first] = true;
      let mut members = vec![first];
      let mut queue = vec![first];
      while let Some(f) = queue.pop() {
        for &h in &cycles[f] {
          let twin = face[h ^ 1];
          if !seen[twin] {
            seen[twin] = true;
            members.push(twin);
            queue.push(twin);
          }
        }
      }

      let outer = members
        .iter()
        .copied()
        .min_by_key(|&f| OrderedFloat(self.cycle_area(keys, &cycles[f])))
        .unwrap_or(first);
      // Rings with an edge in this part are not crossed on the way out to
      // infinity; all others are located at any vertex of the part.
      let touched: BTreeSet<usize> = members
        .iter()
        .flat_map(|&f| &cycles[f])
        .flat_map(|&h| along[h / 2].iter().copied())
        .collect();
      let witness = self.vertices[half_edge(keys, cycles[outer][0]).0];
      parity[outer] = Some(
        rings
          .iter()
          .enumerate()
          .map(|(id, ring)| !touched.contains(&id) && ring_contains(ring, &witness))
          .collect(),
      );

      let mut queue = vec![outer];
      while let Some(f) = queue.pop() {
        let Some(current) = parity[f].clone() else {
          continue;
        };
        for &h in &cycles[f] {
          let twin = face[h ^ 1];
          if parity[twin].is_none() {
            let mut next = current.clone();
            for &id in along[h / 2] {
              next[id] = !next[id];
            }
            parity[twin] = Some(next);
            queue.push(twin);
          }
        }
      }
    }
    parity
      .into_iter()
      .map(|p| p.unwrap_or_else(|| vec![false; rings.len()]))
      .collect()
  }

  fn cycle_area(&self, keys: &[(usize, usize)], cycle: &[usize]) -> f64 {
    let ring: Vec<Point<f64, 2>> = cycle
      .iter()
      .map(|&h| self.vertices[half_edge(keys, h).0])
      .collect();
    ring_signed_area(&ring)
  }

  fn trace(&self, directed: &[(usize, usize)]) -> Vec<Vec<Point<f64, 2>>> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];
    for (id, &(src, _)) in directed.iter().enumerate() {
      outgoing[src].push(id);
    }

    let mut used = vec![false; directed.len()];
    let mut loops = Vec::new();
    for start in 0..directed.len() {
      if used[start] {
        continue;
      }
      let mut ring = Vec::new();
      let mut current = start;
      loop {
        used[current] = true;
        let (src, dst) = directed[current];
        ring.push(self.vertices[src]);
        let next = outgoing[dst]
          .iter()
          .copied()
          .min_by_key(|&id| OrderedFloat(self.clockwise_turn(src, dst, directed[id].1)));
        match next {
          Some(id) if id == start => {
            loops.push(ring);
            break;
          }
          Some(id) if !used[id] => current = id,
          // Inconsistent arrangement. Drop the partial loop.
          _ => break,
        }
      }
    }
    loops
  }

  // Clockwise sweep at `dst` from the way back to `src` over to `next`, in
  // (0, TAU].
  fn clockwise_turn(&self, src: usize, dst: usize, next: usize) -> f64 {
    let origin = &self.vertices[dst];
    let back = (&self.vertices[src] - origin).angle();
    let out = (&self.vertices[next] - origin).angle();
    let sweep = (back - out).rem_euclid(TAU);
    if sweep == 0.0 {
      TAU
    } else {
      sweep
    }
  }
}

fn assemble(loops: Vec<Vec<Point<f64, 2>>>) -> Vec<Polygon> {
  let mut shapes: Vec<Vec<Vec<Point<f64, 2>>>> = Vec::new();
  let mut holes = Vec::new();
  for ring in loops.into_iter().map(drop_colinear) {
    if ring.len() < 3 {
      continue;
    }
    let area = ring_signed_area(&ring);
    if area > 0.0 {
      shapes.push(vec![ring]);
    } else if area < 0.0 {
      holes.push(ring);
    }
  }

  for hole in holes {
    let owner = shapes
      .iter_mut()
      .filter(|rings| encloses(&rings[0], &hole))
      .min_by_key(|rings| OrderedFloat(ring_signed_area(&rings[0])));
    if let Some(rings) = owner {
      rings.push(hole);
    }
  }

  shapes
    .into_iter()
    .map(|rings| {
      let poly = Polygon::from_rings_unchecked(rings);
      debug_assert_ok!(poly.validate());
      poly
    })
    .collect()
}

// Holes may touch their boundary, so judge at a hole vertex off the
// boundary, or at the middle of the first hole edge if there is none.
fn encloses(shell: &[Point<f64, 2>], hole: &[Point<f64, 2>]) -> bool {
  let on_shell = |pt: &Point<f64, 2>| ring_edges(shell).any(|edge| edge.contains(pt));
  let witness = hole
    .iter()
    .copied()
    .find(|pt| !on_shell(pt))
    .unwrap_or_else(|| LineSegment::new(hole[0], hole[1]).midpoint());
  ring_contains(shell, &witness)
}

fn drop_colinear(mut ring: Vec<Point<f64, 2>>) -> Vec<Point<f64, 2>> {
  let mut idx = 0;
  while ring.len() >= 3 && idx < ring.len() {
    let n = ring.len();
    let prev = &ring[(idx + n - 1) % n];
    let next = &ring[(idx + 1) % n];
    if Orientation::new(prev, &ring[idx], next).is_colinear() {
      ring.remove(idx);
      idx = idx.saturating_sub(1);
    } else {
      idx += 1;
    }
  }
  ring
}
