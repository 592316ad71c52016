// Geometric primitives of the GeoJSON model: `Coordinates`, the single geometries (`PointGeometry`,
// `LineStringGeometry`, `PolygonGeometry` built from `RingGeometry`) and their multi-geometry
// counterparts. They share `GeometryTrait` for JSON output and bounds, and `CompositeGeometryTrait`
// for access to their parts.

mod coordinates;
mod linestring;
mod macros;
mod multi_linestring;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;
mod ring;
mod traits;

pub use coordinates::*;
pub use linestring::*;
pub use multi_linestring::*;
pub use multi_point::*;
pub use multi_polygon::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
