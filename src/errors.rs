//! Error taxonomy for the cup pipeline
//!
//! Every failure is one of four kinds. The outer [`CupError`] names the kind,
//! the inner enums carry the details.

use crate::float_types::Real;

/// Result alias used throughout the crate.
pub type CupResult<T> = Result<T, CupError>;

/// All the possible failures of the pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CupError {
    /// The radial expression could not be parsed, bound or probed
    #[error("(ExpressionInvalid) {0}")]
    ExpressionInvalid(#[from] ExpressionError),
    /// The input parameters or the sampled radius profile are not a valid solid
    #[error("(GeometryInvalid) {0}")]
    GeometryInvalid(#[from] GeometryError),
    /// The surface could not be closed into a single watertight manifold
    #[error("(MeshTopologyError) {0}")]
    MeshTopology(#[from] TopologyError),
    /// Sample counts, array lengths or tolerances are unusable
    #[error("(IntegrationDegenerate) {0}")]
    IntegrationDegenerate(#[from] DegenerateError),
}

/// Fieldless view of [`CupError`] for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ExpressionInvalid,
    GeometryInvalid,
    MeshTopology,
    IntegrationDegenerate,
}

impl CupError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            CupError::ExpressionInvalid(_) => ErrorKind::ExpressionInvalid,
            CupError::GeometryInvalid(_) => ErrorKind::GeometryInvalid,
            CupError::MeshTopology(_) => ErrorKind::MeshTopology,
            CupError::IntegrationDegenerate(_) => ErrorKind::IntegrationDegenerate,
        }
    }
}

/// Problems with the user expression, detected at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// (Empty) Nothing but whitespace was supplied
    #[error("(Empty) the expression is empty")]
    Empty,
    /// (Syntax) The grammar rejected the input at a byte offset
    #[error("(Syntax) unexpected input at byte {position}: `{found}`")]
    Syntax { position: usize, found: String },
    /// (UnknownSymbol) An identifier that is neither `z` nor a known constant
    #[error("(UnknownSymbol) `{0}` is not defined; use `z` or `pi`")]
    UnknownSymbol(String),
    /// (UnknownFunction) A call to a function outside the symbol table
    #[error("(UnknownFunction) `{0}` is not one of sin, cos, exp, sqrt, log")]
    UnknownFunction(String),
    /// (NotAFunction) A variable or constant used with call syntax
    #[error("(NotAFunction) `{0}` cannot be called")]
    NotAFunction(String),
    /// (MissingArgument) A function name used without an argument list
    #[error("(MissingArgument) `{0}` must be called with one argument")]
    MissingArgument(String),
    /// (TooDeep) Brackets, signs, powers or operator chains nest too deeply
    #[error("(TooDeep) the expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    /// (ProbeFailed) The compiled function is not finite at z = 0
    #[error("(ProbeFailed) f(0) evaluates to {value}")]
    ProbeFailed { value: Real },
}

/// Invalid parameters or radius profiles.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (NonPositiveHeight) A solid needs `height > 0`
    #[error("(NonPositiveHeight) height must be positive, got {0}")]
    NonPositiveHeight(Real),
    /// (NegativeHeight) Integration over a reversed interval
    #[error("(NegativeHeight) height must not be negative, got {0}")]
    NegativeHeight(Real),
    /// (NegativeBaseRadius) `baseRadius < 0`
    #[error("(NegativeBaseRadius) base radius must not be negative, got {0}")]
    NegativeBaseRadius(Real),
    /// (NonFiniteParameter) A NaN or infinite input
    #[error("(NonFiniteParameter) `{name}` is not finite ({value})")]
    NonFiniteParameter { name: &'static str, value: Real },
    /// (NegativeRadius) The sampled profile dips below the axis
    #[error("(NegativeRadius) r(z) = {radius} < 0 at z = {z}")]
    NegativeRadius { z: Real, radius: Real },
    /// (NonFiniteRadius) The sampled profile is NaN or infinite
    #[error("(NonFiniteRadius) r(z) is not finite ({radius}) at z = {z}")]
    NonFiniteRadius { z: Real, radius: Real },
}

/// Violations of the closed-manifold contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// (NotTriangulated) A face with more than three corners reached a
    /// triangle-only operation
    #[error("(NotTriangulated) face {face} has {corners} corners")]
    NotTriangulated { face: usize, corners: usize },
    /// (InvalidFace) A face references a vertex that does not exist or has too few corners
    #[error("(InvalidFace) face {face} is malformed")]
    InvalidFace { face: usize },
    /// (SeamGap) Two vertices the lattice says coincide are further apart
    /// than the weld tolerance
    #[error("(SeamGap) vertex {vertex} is {distance} away from its seam partner")]
    SeamGap { vertex: usize, distance: Real },
    /// (EmptySurface) Nothing survived the weld
    #[error("(EmptySurface) no triangles remain after welding")]
    EmptySurface,
    /// (BoundaryEdges) Edges used by a single triangle
    #[error("(BoundaryEdges) {0} edges are used by only one triangle")]
    BoundaryEdges(usize),
    /// (NonManifoldEdges) Edges shared by more than two triangles
    #[error("(NonManifoldEdges) {0} edges are shared by more than two triangles")]
    NonManifoldEdges(usize),
    /// (InconsistentOrientation) Two neighbours traverse their common edge the same way
    #[error("(InconsistentOrientation) {0} edges are traversed twice in the same direction")]
    InconsistentOrientation(usize),
    /// (Disconnected) More than one edge-connected component
    #[error("(Disconnected) the surface has {0} components")]
    Disconnected(usize),
    /// (InwardOrientation) The closed surface winds inward
    #[error("(InwardOrientation) signed volume {0} is not positive")]
    InwardOrientation(Real),
    /// (SelfIntersection) Two non-adjacent triangles intersect
    #[error("(SelfIntersection) triangles {0} and {1} intersect")]
    SelfIntersection(usize, usize),
}

/// Unusable configuration: sample counts, lengths, tolerances.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DegenerateError {
    /// (TooFewSamples) A sampled axis below its minimum count
    #[error("(TooFewSamples) `{what}` needs at least {minimum} samples, got {count}")]
    TooFewSamples {
        what: &'static str,
        count: usize,
        minimum: usize,
    },
    /// (LengthMismatch) Paired arrays of different lengths
    #[error("(LengthMismatch) expected {expected} values, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    /// (InvalidTolerance) A weld tolerance that is not a positive finite number
    #[error("(InvalidTolerance) weld tolerance must be positive and finite, got {0}")]
    InvalidTolerance(Real),
}
