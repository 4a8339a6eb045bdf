use serde::Serialize;

/// Static description of one served endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    #[serde(rename = "route")]
    pub path: &'static str,
    pub methods: &'static [&'static str],
    pub description: &'static str,
}

/// Every route mounted by [`InfoApi::router`](crate::InfoApi::router).
pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        path: "/",
        methods: &["GET"],
        description: "list of served routes",
    },
    RouteInfo {
        path: "/status",
        methods: &["GET"],
        description: "liveness of the info service",
    },
    RouteInfo {
        path: "/metadata",
        methods: &["GET"],
        description: "deployment metadata as persisted",
    },
    RouteInfo {
        path: "/labinfo",
        methods: &["GET"],
        description: "lab configuration as persisted",
    },
    RouteInfo {
        path: "/petname",
        methods: &["GET"],
        description: "human-friendly deployment name",
    },
];
