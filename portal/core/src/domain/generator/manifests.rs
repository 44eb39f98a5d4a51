// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Kubernetes Manifest Generators
//!
//! Four manifests per application: deployment, service, ingress, configmap.
//! The image reference stays as the `__IMAGE__` placeholder; the deploy jobs
//! substitute the registry/tag at apply time. Namespace-dependent values use
//! release placeholders resolved by the deployment tooling.

use crate::domain::descriptor::ApplicationDescriptor;

pub(super) fn deployment(d: &ApplicationDescriptor) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
  labels:
    app: {name}
    environment: {{{{ .Release.Namespace }}}}
spec:
  replicas: {replicas}
  selector:
    matchLabels:
      app: {name}
  template:
    metadata:
      labels:
        app: {name}
    spec:
      imagePullSecrets:
      - name: regcred
      containers:
      - name: {name}
        image: __IMAGE__
        ports:
        - containerPort: {port}
        env:
        - name: APP_ENV
          value: {{{{ .Release.Namespace }}}}
        - name: APP_PORT
          value: "{port}"
        resources:
          requests:
            memory: "{memory_request}"
            cpu: "{cpu_request}"
          limits:
            memory: "{memory_limit}"
            cpu: "{cpu_limit}"
        livenessProbe:
          httpGet:
            path: /health
            port: {port}
          initialDelaySeconds: 30
          periodSeconds: 10
        readinessProbe:
          httpGet:
            path: /health
            port: {port}
          initialDelaySeconds: 5
          periodSeconds: 5
"#,
        name = d.name,
        replicas = d.replica_count,
        port = d.port,
        memory_request = d.memory_request,
        memory_limit = d.memory_limit,
        cpu_request = d.cpu_request,
        cpu_limit = d.cpu_limit,
    )
}

pub(super) fn service(d: &ApplicationDescriptor) -> String {
    format!(
        r#"apiVersion: v1
kind: Service
metadata:
  name: {name}
  labels:
    app: {name}
spec:
  selector:
    app: {name}
  ports:
  - port: 80
    targetPort: {port}
    protocol: TCP
  type: ClusterIP
"#,
        name = d.name,
        port = d.port,
    )
}

pub(super) fn ingress(d: &ApplicationDescriptor) -> String {
    format!(
        r#"apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: {name}
  annotations:
    kubernetes.io/ingress.class: nginx
    cert-manager.io/cluster-issuer: letsencrypt-prod
spec:
  tls:
  - hosts:
    - {name}.{{{{ .Release.Namespace }}}}.yourdomain.com
    secretName: {name}-tls
  rules:
  - host: {name}.{{{{ .Release.Namespace }}}}.yourdomain.com
    http:
      paths:
      - path: /
        pathType: Prefix
        backend:
          service:
            name: {name}
            port:
              number: 80
"#,
        name = d.name,
    )
}

pub(super) fn configmap(d: &ApplicationDescriptor) -> String {
    format!(
        r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: {name}-config
data:
  app.env: |
    APP_NAME={name}
    APP_ENVIRONMENT={{{{ .Release.Namespace }}}}
    APP_VERSION={{{{ .Values.image.tag }}}}
"#,
        name = d.name,
    )
}
