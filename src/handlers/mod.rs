// handlers/mod.rs - 2-Tier Handler Architecture
//
// Public (no credential) → Protected (per-site x-api-key)
//
pub mod public;    // Tier 1: No credential required (/, /health)
pub mod protected; // Tier 2: Site API key required (/content)

/*
ROUTING OVERVIEW:

src/
├── handlers/
│   ├── mod.rs            ← This file
│   ├── public/
│   │   ├── root.rs       ← GET /        service banner
│   │   └── health.rs     ← GET /health  liveness + store connectivity
│   └── protected/
│       └── content.rs    ← GET /content globals and public collections
│
└── server.rs             ← Router, state and global layers

The protected tier does no authorization of its own: api_key_middleware only
forwards the presented header, and ContentGateway decides 401 vs 403 after
parameter validation has run.
*/
