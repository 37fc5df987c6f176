// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kind every namespace specification must declare
pub const NAMESPACE_KIND: &str = "Namespace";

/// Label key every namespace cluster selector must constrain
pub const INFRA_BOUNDARY_LABEL: &str = "infra-boundary";

/// Cluster label used to pick an environment quota block
pub const ENVIRONMENT_LABEL: &str = "environment";

/// Resource quota keys accepted in a quota block
pub const SUPPORTED_QUOTA_KEYS: [&str; 15] = [
    "pods",
    "services",
    "resourcequotas",
    "secrets",
    "configmaps",
    "persistentvolumeclaims",
    "services.nodeports",
    "services.loadbalancers",
    "requests.cpu",
    "requests.memory",
    "requests.storage",
    "requests.ephemeral-storage",
    "limits.cpu",
    "limits.memory",
    "limits.ephemeral-storage",
];

/// Namespaces reserved by the platform
pub const DEFAULT_RESTRICTED_NAMESPACES: [&str; 7] = [
    "default",
    "kube-ingress",
    "kube-node-lease",
    "kube-public",
    "kube-storageclass",
    "kube-system",
    "kube-webhooks",
];

/// Default directory layout used by the CLI
pub mod dirs {
    pub const CLUSTERS: &str = "registry/clusters";
    pub const INPUT: &str = "app-provisioner-data/data/namespace";
    pub const OUTPUT: &str = "output";
}

/// Labels and names stamped on generated manifests
pub mod manifests {
    pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
    pub const OWNER_LABEL: &str = "provisioner.io/owner";
    pub const OPERATOR_NAME: &str = "namespace-provisioner";
    pub const ADMIN_CLUSTER_ROLE: &str = "admin";
}
