/// Router Module Index
///
/// Organizes the application's routing logic into zone-segregated modules
/// matching the authorization gate's route classification. The gate middleware
/// itself is layered over the merged router in `create_router`; this split
/// keeps each zone's registration (and its documentation) in one place.
///
/// The two modules map directly to the gate's public and protected zones; the
/// auth-only entry pages live with the public module since they are served to
/// anonymous visitors.

/// Routes accessible to all visitors (marketing pages, legal documents,
/// waitlist signup, session establishment).
pub mod public;

/// Routes inside the protected zone. The gate redirects unauthenticated
/// requests for these paths to the login target.
pub mod authenticated;
