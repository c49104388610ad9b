use nimbus_domain::ServiceDescriptor;

/// Namespace, alias and ARN dimension patterns for every supported service.
const SERVICES: &[(&str, &str, &[&str])] = &[
    (
        "AWS/ApiGateway",
        "apigateway",
        &["apis/(?P<ApiName>[^/]+)$", "apis/(?P<ApiName>[^/]+)/stages/(?P<Stage>[^/]+)$"],
    ),
    (
        "AWS/ApplicationELB",
        "alb",
        &[
            ":(?P<TargetGroup>targetgroup/.+)",
            ":loadbalancer/(?P<LoadBalancer>.+)$",
        ],
    ),
    ("AWS/AutoScaling", "asg", &["autoScalingGroupName/(?P<AutoScalingGroupName>[^/]+)"]),
    (
        "AWS/CloudFront",
        "cf",
        &[":distribution/(?P<DistributionId>[^/]+)"],
    ),
    ("AWS/DynamoDB", "dynamodb", &[":table/(?P<TableName>[^/]+)"]),
    ("AWS/EBS", "ebs", &["volume/(?P<VolumeId>[^/]+)"]),
    ("AWS/EC2", "ec2", &["instance/(?P<InstanceId>[^/]+)"]),
    (
        "AWS/ECS",
        "ecs-svc",
        &[
            ":cluster/(?P<ClusterName>[^/]+)$",
            ":service/(?P<ClusterName>[^/]+)/(?P<ServiceName>[^/]+)$",
        ],
    ),
    ("AWS/EFS", "efs", &["file-system/(?P<FileSystemId>[^/]+)"]),
    ("AWS/ELB", "elb", &[":loadbalancer/(?P<LoadBalancerName>.+)$"]),
    (
        "AWS/ElastiCache",
        "ec",
        &["cluster:(?P<CacheClusterId>[^/]+)"],
    ),
    ("AWS/ES", "es", &[":domain/(?P<DomainName>[^/]+)"]),
    ("AWS/Firehose", "firehose", &[":deliverystream/(?P<DeliveryStreamName>[^/]+)"]),
    ("AWS/Kafka", "kafka", &[":cluster/(?P<Cluster_Name>[^/]+)"]),
    ("AWS/Kinesis", "kinesis", &[":stream/(?P<StreamName>[^/]+)"]),
    ("AWS/Lambda", "lambda", &[":function:(?P<FunctionName>[^/]+)"]),
    ("AWS/NATGateway", "ngw", &["natgateway/(?P<NatGatewayId>[^/]+)"]),
    ("AWS/NetworkELB", "nlb", &[":loadbalancer/(?P<LoadBalancer>.+)$"]),
    ("AWS/RDS", "rds", &[":db:(?P<DBInstanceIdentifier>[^/]+)"]),
    ("AWS/Redshift", "redshift", &[":cluster:(?P<ClusterIdentifier>[^/]+)"]),
    ("AWS/S3", "s3", &["(?P<BucketName>[^:]+)$"]),
    ("AWS/SNS", "sns", &["(?P<TopicName>[^:]+)$"]),
    ("AWS/SQS", "sqs", &["(?P<QueueName>[^:]+)$"]),
    ("AWS/States", "sfn", &["(?P<StateMachineArn>.*)"]),
    ("AWS/TransitGateway", "tgw", &[":transit-gateway/(?P<TransitGateway>[^/]+)"]),
    ("AWS/VPN", "vpn", &[":vpn-connection/(?P<VpnId>[^/]+)"]),
    ("Glue", "glue", &[":job/(?P<JobName>[^/]+)"]),
    (
        "/aws/sagemaker/TrainingJobs",
        "sagemaker-training",
        &[":training-job/(?P<Host>[^/]+)"],
    ),
    (
        "/aws/sagemaker/Endpoints",
        "sagemaker-endpoints",
        &[":endpoint/(?P<EndpointName>[^/]+)$"],
    ),
];

pub fn builtin_services() -> Vec<ServiceDescriptor> {
    SERVICES
        .iter()
        .map(|(namespace, alias, patterns)| {
            ServiceDescriptor::new(namespace, alias, patterns.iter().copied())
        })
        .collect()
}
